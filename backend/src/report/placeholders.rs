//! # Placeholder substitution
//!
//! Free-form report content and uploaded templates refer to student fields
//! with bracketed tokens such as `[NAME]` or `[BLOOD_GROUP]`. Substitution is
//! a single left-to-right pass: a value inserted for one token is never
//! rescanned, so the result does not depend on token order and a name that
//! happens to contain `[USN]` stays literal.
//!
//! Matching is exact and case-sensitive. Brackets that do not spell a known
//! token are copied through untouched.

use common::model::student::StudentRecord;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Name,
    Usn,
    Dob,
    Father,
    Mother,
    Branch,
    Phone,
    Email,
    Sports,
    BloodGroup,
    Gender,
}

impl Token {
    pub const ALL: [Token; 11] = [
        Token::Name,
        Token::Usn,
        Token::Dob,
        Token::Father,
        Token::Mother,
        Token::Branch,
        Token::Phone,
        Token::Email,
        Token::Sports,
        Token::BloodGroup,
        Token::Gender,
    ];

    /// The token name between the brackets.
    pub fn key(self) -> &'static str {
        match self {
            Token::Name => "NAME",
            Token::Usn => "USN",
            Token::Dob => "DOB",
            Token::Father => "FATHER",
            Token::Mother => "MOTHER",
            Token::Branch => "BRANCH",
            Token::Phone => "PHONE",
            Token::Email => "EMAIL",
            Token::Sports => "SPORTS",
            Token::BloodGroup => "BLOOD_GROUP",
            Token::Gender => "GENDER",
        }
    }

    /// The literal as written in templates, e.g. `[NAME]`.
    pub fn literal(self) -> String {
        format!("[{}]", self.key())
    }

    pub fn from_key(key: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.key() == key)
    }

    /// This token's value for `student`; absent fields are empty.
    pub fn value(self, student: &StudentRecord) -> &str {
        let field = match self {
            Token::Name => return &student.name,
            Token::Usn => return &student.usn,
            Token::Phone => return &student.phone,
            Token::Dob => &student.dob,
            Token::Father => &student.father_name,
            Token::Mother => &student.mother_name,
            Token::Branch => &student.branch,
            Token::Email => &student.email,
            Token::Sports => &student.sports,
            Token::BloodGroup => &student.blood_group,
            Token::Gender => &student.gender,
        };
        field.as_deref().unwrap_or("")
    }
}

fn token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| {
        let alternatives: Vec<&str> = Token::ALL.iter().map(|t| t.key()).collect();
        Regex::new(&format!(r"\[({})\]", alternatives.join("|"))).expect("token pattern")
    })
}

/// Replaces every supported token in `content` with `student`'s value.
pub fn substitute<'a>(content: &'a str, student: &StudentRecord) -> Cow<'a, str> {
    token_regex().replace_all(content, |caps: &Captures| {
        Token::from_key(&caps[1])
            .map(|token| token.value(student))
            .unwrap_or_default()
            .to_string()
    })
}

/// Whether `content` still holds any supported token.
pub fn contains_tokens(content: &str) -> bool {
    token_regex().is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn asha() -> StudentRecord {
        StudentRecord {
            id: 7,
            name: "Asha Rao".into(),
            dob: Some("2003-04-11".into()),
            mother_name: Some("Lakshmi".into()),
            father_name: Some("Ramesh".into()),
            branch: Some("CSE".into()),
            semester: Some("5".into()),
            usn: "1DS21CS01".into(),
            phone: "9876543210".into(),
            email: Some("asha@example.com".into()),
            photo_ref: None,
            sports: Some("Chess, Kabaddi".into()),
            blood_group: None,
            gender: Some("F".into()),
        }
    }

    #[test]
    fn replaces_name_and_usn() {
        assert_eq!(substitute("[NAME] ([USN])", &asha()), "Asha Rao (1DS21CS01)");
    }

    #[test]
    fn absent_field_becomes_empty() {
        assert_eq!(substitute("Blood: [BLOOD_GROUP]", &asha()), "Blood: ");
    }

    #[test]
    fn every_token_is_recognised() {
        let content: String = Token::ALL.iter().map(|t| t.literal()).collect::<Vec<_>>().join("|");
        let out = substitute(&content, &asha());
        assert_eq!(
            out,
            "Asha Rao|1DS21CS01|2003-04-11|Ramesh|Lakshmi|CSE|9876543210|asha@example.com|Chess, Kabaddi||F"
        );
        assert!(!contains_tokens(&out));
    }

    #[test]
    fn repeated_tokens_all_replaced() {
        assert_eq!(substitute("[NAME]/[NAME]/[NAME]", &asha()), "Asha Rao/Asha Rao/Asha Rao");
    }

    #[test]
    fn unknown_and_lowercase_tokens_stay_verbatim() {
        let content = "[name] [COLLEGE] [Photo] [NAME";
        assert_eq!(substitute(content, &asha()), content);
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let mut student = asha();
        student.name = "[USN]".into();
        assert_eq!(substitute("[NAME] [USN]", &student), "[USN] 1DS21CS01");
    }

    #[test]
    fn token_free_text_is_unchanged() {
        let content = "Physical Education Director            Head of the Department";
        let once = substitute(content, &asha());
        assert!(matches!(once, Cow::Borrowed(_)));
        assert_eq!(substitute(&once, &asha()), content);
    }

    #[test]
    fn substitution_is_idempotent_once_tokens_are_gone() {
        let once = substitute("Mr/Ms [NAME] of [BRANCH]", &asha()).into_owned();
        assert_eq!(substitute(&once, &asha()), once);
    }
}
