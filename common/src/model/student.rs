use serde::{Deserialize, Serialize};

/// A stored student, as returned by the record store.
///
/// Every field is named; nothing downstream indexes into a row by position.
/// Optional fields are `None` when the form left them blank, and render as
/// an empty string in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Server-generated identifier. Never changes after insert.
    pub id: i64,
    pub name: String,
    pub dob: Option<String>,
    pub mother_name: Option<String>,
    pub father_name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    /// University seat number, exactly 10 characters and unique.
    pub usn: String,
    pub phone: String,
    pub email: Option<String>,
    /// Opaque photo reference resolved by the photo store (a file name).
    pub photo_ref: Option<String>,
    /// Comma separated list of sports, kept as entered.
    pub sports: Option<String>,
    pub blood_group: Option<String>,
    pub gender: Option<String>,
}

impl StudentRecord {
    /// The photo reference, treating a blank string as no photo.
    pub fn photo(&self) -> Option<&str> {
        self.photo_ref.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Fields submitted by the data-entry and edit forms.
///
/// The photo is not part of the form: it arrives as a separate upload and
/// is stored by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    pub name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub mother_name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub semester: String,
    pub usn: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub sports: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub gender: String,
}

impl StudentForm {
    /// Trims every field in place, the way submitted form values are read.
    pub fn normalize(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.dob,
            &mut self.mother_name,
            &mut self.father_name,
            &mut self.branch,
            &mut self.semester,
            &mut self.usn,
            &mut self.phone,
            &mut self.email,
            &mut self.sports,
            &mut self.blood_group,
            &mut self.gender,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }

    /// Sets a field by its form name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "dob" => self.dob = value,
            "mother_name" => self.mother_name = value,
            "father_name" => self.father_name = value,
            "branch" => self.branch = value,
            "semester" => self.semester = value,
            "usn" => self.usn = value,
            "phone" => self.phone = value,
            "email" => self.email = value,
            "sports" => self.sports = value,
            "blood_group" => self.blood_group = value,
            "gender" => self.gender = value,
            _ => {}
        }
    }
}

/// Maps a blank form value to `None` for storage.
pub fn optional(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_all_fields() {
        let form = StudentForm {
            name: "  Asha Rao ".into(),
            usn: "1DS21CS001\n".into(),
            phone: " 9876543210".into(),
            sports: " Chess, Kabaddi ".into(),
            ..Default::default()
        }
        .normalize();

        assert_eq!(form.name, "Asha Rao");
        assert_eq!(form.usn, "1DS21CS001");
        assert_eq!(form.phone, "9876543210");
        assert_eq!(form.sports, "Chess, Kabaddi");
    }

    #[test]
    fn set_ignores_unknown_fields() {
        let mut form = StudentForm::default();
        form.set("blood_group", "O+".into());
        form.set("photo", "ignored.png".into());
        assert_eq!(form.blood_group, "O+");
    }

    #[test]
    fn blank_photo_reference_is_no_photo() {
        let record = StudentRecord {
            id: 1,
            name: "A".into(),
            dob: None,
            mother_name: None,
            father_name: None,
            branch: None,
            semester: None,
            usn: "1DS21CS001".into(),
            phone: "9876543210".into(),
            email: None,
            photo_ref: Some("   ".into()),
            sports: None,
            blood_group: None,
            gender: None,
        };
        assert_eq!(record.photo(), None);
        assert_eq!(optional(" "), None);
        assert_eq!(optional("B+"), Some("B+"));
    }
}
