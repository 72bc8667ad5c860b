//! Default title and content offered by the free-form report editor.

use super::{load_students, ReportError, ReportFormat, Selection};
use crate::store::StudentStore;
use common::requests::EditorDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draft {
    pub title: &'static str,
    pub content: &'static str,
}

const ELIGIBILITY_DRAFT: Draft = Draft {
    title: "ELIGIBILITYPROFORMA",
    content: "ELIGIBILITYPROFORMA
ELIGIBITY PROFORMA OF PLAYERS REPRESENTING COLLEGE IN VTU INTER-COLLEGIATE SPORTS/TOURNAMENT 2025-26
COLLEGE NAME & ADDRESS : DAYANANDA SAGAR ACADEMY OF TECHNOLOGY AND MANAGEMENT , BANGALURU 560082
GAME :- ____________
ORGANISING COLLEGE:- __________________________________DIVISION : Bangalore division _________________

Name: [NAME]
Father: [FATHER]
Mother: [MOTHER]
Branch: [BRANCH]
USN: [USN]
Course: [BRANCH]
Duration: 4 Years
DOB: [DOB]
Contact: [PHONE]
Blood Group: [BLOOD_GROUP]
PUC Date: ___
First Admission: ___
Current Admission: ___
Game: [SPORTS]
Year: ___",
};

const HOD_DRAFT: Draft = Draft {
    title: "HOD BONAFIDE CERTIFICATE",
    content: "This is to certify that Mr/Ms [NAME] is a student of [BRANCH] department studying in _____________ Semester Bearing USN [USN] for academic year
20__-20__.And his/her present attendance is _________% he/she can/can't take part in sports activity on __/__/____ to__/__/____.



Physical Education Director            Head of the Department",
};

const VTU_DRAFT: Draft = Draft {
    title: "VTU BONAFIDE CERTIFICATE",
    content: "Visvesvaraya Technological University
Belagavi - 590018

BONAFIDE CERTIFICATE

Certified that Mr./Ms. [NAME] bearing USN: [USN] is a bonafide student of our college affiliated to Visvesvaraya Technological University.

Course: [BRANCH]
Date of Birth: [DOB]
Father's Name: [FATHER]
Mother's Name: [MOTHER]
Contact: [PHONE]

This certificate is issued for official purposes.

Physical Education Director            Principal",
};

pub fn default_draft(format: ReportFormat) -> Draft {
    match format {
        ReportFormat::Eligibility => ELIGIBILITY_DRAFT,
        ReportFormat::HodBonafide => HOD_DRAFT,
        ReportFormat::Detailed | ReportFormat::TournamentBonafide | ReportFormat::Edited => {
            VTU_DRAFT
        }
    }
}

/// Loads the selected students and pairs them with the format's draft.
pub fn prepare_draft(
    store: &StudentStore,
    selector: &str,
    ids: &[i64],
) -> Result<EditorDraft, ReportError> {
    let format = ReportFormat::parse(selector);
    let students = load_students(store, &Selection::Ids(ids.to_vec()))?;
    let draft = default_draft(format);
    Ok(EditorDraft {
        report_format: format.slug().to_string(),
        report_title: draft.title.to_string(),
        report_content: draft.content.to_string(),
        students,
    })
}
