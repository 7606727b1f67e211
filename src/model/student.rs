use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        StudentId(id.to_owned())
    }
}

#[derive(Clone, Debug)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub home_lat: f64,
    pub home_lon: f64,
}

impl Student {
    pub fn new(id: StudentId, name: String, home_lat: f64, home_lon: f64) -> Student {
        Student {
            id,
            name,
            home_lat,
            home_lon,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

/// Attendance percentage of a student, between 0 and 100.
#[derive(Clone, Debug)]
pub struct AttendanceRecord {
    pub attendance_percentage: f64,
}
