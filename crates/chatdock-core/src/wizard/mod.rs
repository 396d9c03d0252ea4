//! Two-step configuration wizard.
//!
//! `Basic` collects company branding and bot basics; a successful company
//! upsert moves the wizard to `Knowledge`, where knowledge items are edited
//! and the bot is created. Stepping back to `Basic` keeps the knowledge list;
//! moving forward again needs another successful upsert.
//!
//! Submissions are atomic from the wizard's point of view: on failure the
//! step and every entered value stay as they were.

pub mod knowledge;
pub mod session;

use std::fmt;

use chatdock_types::bot::{Bot, CreateBotRequest, Tone};
use chatdock_types::company::{
    Company, CompanyUpsert, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, LogoUpload,
};
use chatdock_types::error::WizardError;

use crate::api::WidgetApi;
use crate::selection::bot_home_path;

pub use knowledge::KnowledgeList;
pub use session::Session;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basic,
    Knowledge,
}

impl WizardStep {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Basic => "basic",
            WizardStep::Knowledge => "knowledge",
        }
    }

    /// 1-based position, as shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Basic => 1,
            WizardStep::Knowledge => 2,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields of the basic step.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub company_name: String,
    /// Blank means "let the backend name it".
    pub bot_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo: Option<LogoUpload>,
    pub tone: Option<Tone>,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            bot_name: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            logo: None,
            tone: Some(Tone::Professional),
        }
    }
}

impl BasicInfo {
    fn apply_company(&mut self, company: &Company) {
        self.company_name = company.name.clone();
        self.primary_color = company.primary_color.clone();
        self.secondary_color = company.secondary_color.clone();
    }

    fn to_upsert(&self) -> CompanyUpsert {
        CompanyUpsert {
            name: self.company_name.trim().to_string(),
            primary_color: non_blank(&self.primary_color),
            secondary_color: non_blank(&self.secondary_color),
            logo: self.logo.clone(),
        }
    }
}

/// Result of a successful bot creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupOutcome {
    pub bot: Bot,
    /// Where the console goes next: the home view with the new bot selected.
    pub redirect: String,
}

/// State machine behind the setup flow.
#[derive(Debug, Clone)]
pub struct ConfigWizard {
    session: Session,
    step: WizardStep,
    basic: BasicInfo,
    knowledge: KnowledgeList,
}

impl ConfigWizard {
    /// Start on the basic step, prefilled from the session's company if known.
    pub fn new(session: Session) -> Self {
        let mut basic = BasicInfo::default();
        if let Some(company) = session.company() {
            basic.apply_company(company);
        }
        Self {
            session,
            step: WizardStep::Basic,
            basic,
            knowledge: KnowledgeList::new(),
        }
    }

    /// Load the existing company and copy its branding into the basic step.
    ///
    /// No company, or a failed request, leaves the form as it is. Returns
    /// whether a company was found.
    pub async fn prefill<A: WidgetApi>(&mut self, api: &A) -> bool {
        match api.get_company().await {
            Ok(Some(company)) => {
                tracing::debug!(company_id = %company.id, "prefilling wizard from existing company");
                self.basic.apply_company(&company);
                self.session.set_company(company);
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "error fetching company");
                false
            }
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn basic(&self) -> &BasicInfo {
        &self.basic
    }

    pub fn basic_mut(&mut self) -> &mut BasicInfo {
        &mut self.basic
    }

    pub fn knowledge(&self) -> &KnowledgeList {
        &self.knowledge
    }

    pub fn knowledge_mut(&mut self) -> &mut KnowledgeList {
        &mut self.knowledge
    }

    /// Upsert the company and advance to the knowledge step.
    pub async fn submit_basic<A: WidgetApi>(&mut self, api: &A) -> Result<&Company, WizardError> {
        self.expect_step(WizardStep::Basic)?;
        if self.basic.company_name.trim().is_empty() {
            return Err(WizardError::CompanyNameRequired);
        }

        let upsert = self.basic.to_upsert();
        let company = api.upsert_company(&upsert).await.map_err(|err| {
            tracing::error!(error = %err, "error saving company configuration");
            WizardError::CompanySave(err)
        })?;

        tracing::info!(company_id = %company.id, "company configuration saved");
        self.session.set_company(company);
        self.step = WizardStep::Knowledge;

        self.session.company().ok_or(WizardError::NoCompany)
    }

    /// Return to the basic step. Knowledge items are kept.
    pub fn back(&mut self) -> bool {
        let moved = self.step != WizardStep::Basic;
        self.step = WizardStep::Basic;
        moved
    }

    /// The bot creation request the knowledge step would submit.
    pub fn bot_request(&self) -> Result<CreateBotRequest, WizardError> {
        let company = self.session.company().ok_or(WizardError::NoCompany)?;
        Ok(CreateBotRequest {
            company_id: company.id.clone(),
            name: non_blank(&self.basic.bot_name),
            tone: self.basic.tone,
            knowledge_items: self.knowledge.to_request_items(),
        })
    }

    /// Create the bot. On success the knowledge list is cleared and the
    /// outcome carries the redirect to the new bot.
    pub async fn submit_bot<A: WidgetApi>(&mut self, api: &A) -> Result<SetupOutcome, WizardError> {
        self.expect_step(WizardStep::Knowledge)?;
        let request = self.bot_request()?;

        let bot = api.create_bot(&request).await.map_err(|err| {
            tracing::error!(error = %err, "error saving bot configuration");
            WizardError::BotSave(err)
        })?;

        tracing::info!(bot_id = %bot.id, knowledge_items = request.knowledge_items.len(), "bot created");
        self.knowledge.clear();

        Ok(SetupOutcome {
            redirect: bot_home_path(&bot.id),
            bot,
        })
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected: expected.name(),
                actual: self.step.name(),
            })
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
