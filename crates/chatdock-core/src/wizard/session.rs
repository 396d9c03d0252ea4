//! Explicit per-console session context.

use chatdock_types::company::Company;

/// Values the wizard and the console share for one session.
///
/// The backend holds at most one company per session; once it is known it is
/// stored here instead of being re-derived from whatever loaded first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    company: Option<Company>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(company: Company) -> Self {
        Self {
            company: Some(company),
        }
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    pub fn set_company(&mut self, company: Company) {
        self.company = Some(company);
    }
}
