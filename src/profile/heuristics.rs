//! Regular-expression heuristics that turn page text into profile fields.
//!
//! Every pattern list is tried in order and the first match wins.

use regex::Regex;

use crate::profile::types::LinkedInInsights;
use crate::scraping::ScrapingError;

/// Role names recognised next to a person's name.
const ROLE: &str = r"CEO|CTO|CFO|Founder|Director|Manager|Head\s+of\s+[A-Za-z]+|VP\s+of\s+[A-Za-z]+";

/// Person name: two or more capitalised words.
const PERSON: &str = r"[A-Z][a-z]+(?:\s[A-Z][a-z]+)+";

/// Industry phrases ending in an organisation noun.
const ORGANISATION: &str = r"company|corporation|manufacturer|producer|provider|retailer|supplier";

/// Compiled heuristics, built once per profiler.
#[derive(Debug)]
pub struct Heuristics {
    size: Vec<Regex>,
    industry: Vec<Regex>,
    revenue: Vec<Regex>,
    followers: Vec<Regex>,
    employees: Vec<Regex>,
    location: Vec<Regex>,
    specialties: Vec<Regex>,
    company_type: Vec<Regex>,
    pub(crate) email: Regex,
    pub(crate) phone: Regex,
    pub(crate) name_then_title: Regex,
    pub(crate) title_then_name: Regex,
    name_suffixes: Vec<Regex>,
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, ScrapingError> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(ScrapingError::from))
        .collect()
}

impl Heuristics {
    /// Compile every pattern.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, ScrapingError> {
        Ok(Self {
            size: compile(&[
                r"(?i)(\d{1,3}(?:,\d{3})*(?:\+)?\s*employees)".to_string(),
                r"(?i)((?:about|approximately|over|more than)\s+\d{1,3}(?:,\d{3})*\s+employees)".to_string(),
                r"(?i)(team of \d{1,3}(?:,\d{3})*(?:\+)?)".to_string(),
            ])?,
            industry: compile(&[
                r"(?i)industry:\s*([^.]+)".to_string(),
                format!(r"(?i)(?:is\s+)?(?:a|an)\s+([^,.]+(?:{ORGANISATION}))"),
                r"(?i)operates\s+in\s+the\s+([^,.]+)\s+(?:industry|sector|market)".to_string(),
                format!(r"(?i)leading\s+([^,.]+(?:{ORGANISATION}))"),
            ])?,
            revenue: compile(&[
                r"(?i)revenue[:\s]+(?:US)?\$?\s*([\d.]+\s*(?:billion|million|trillion))".to_string(),
                r"(?i)(?:US)?\$?\s*([\d.]+\s*(?:billion|million|trillion))\s+in\s+revenue".to_string(),
            ])?,
            followers: compile(&[
                r"(?i)([\d,.]+\s*(?:k|m|b)?)\s*(?:followers|fans|likes)".to_string(),
                r"(?i)(?:followed by|following)\s*([\d,.]+\s*(?:k|m|b)?)".to_string(),
            ])?,
            employees: compile(&[
                r"(?i)([\d,]+(?:\+)?)\s*employees".to_string(),
                r"(?i)([\d,.]+k?\+?)\s*employees".to_string(),
            ])?,
            location: compile(&[
                r"(?:headquarters|located in|based in)\s*([^.]+)".to_string(),
                r"(?:from|in)\s*((?:[A-Z][a-z]+(?:\s*,\s*)?)+)".to_string(),
            ])?,
            specialties: compile(&[
                r"(?i)specialties?:?\s*([^.]+)".to_string(),
                r"(?i)specializing in\s*([^.]+)".to_string(),
            ])?,
            company_type: compile(&[
                r"(?i)(?:is\s+)?(?:a|an)\s+([^,.]+(?:company|corporation|manufacturer|producer|provider))".to_string(),
                r"(?i)type:?\s*([^.]+)".to_string(),
            ])?,
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")?,
            phone: Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")?,
            name_then_title: Regex::new(&format!(r"({PERSON})\s*[-–]\s*((?:{ROLE}))"))?,
            title_then_name: Regex::new(&format!(r"((?:{ROLE}))\s*[-:]\s*({PERSON})"))?,
            name_suffixes: compile(&[
                r"\s*\|.*$".to_string(),
                r"\s*-.*$".to_string(),
                r"(?i)\s*inc\.?$".to_string(),
                r"(?i)\s*llc\.?$".to_string(),
            ])?,
        })
    }

    /// Headcount phrase such as `1,200 employees` or `team of 40`.
    #[must_use]
    pub fn company_size(&self, text: &str) -> Option<String> {
        first_capture(&self.size, text)
    }

    /// Industry phrase longer than five characters.
    #[must_use]
    pub fn industry(&self, text: &str) -> Option<String> {
        self.industry.iter().find_map(|pattern| {
            let industry = pattern.captures(text)?.get(1)?.as_str().trim().to_string();
            (industry.len() > 5).then_some(industry)
        })
    }

    /// Revenue amount, prefixed with `$`.
    #[must_use]
    pub fn revenue(&self, text: &str) -> Option<String> {
        first_capture(&self.revenue, text).map(|amount| format!("${amount}"))
    }

    /// Follower count from a social snippet.
    #[must_use]
    pub fn followers(&self, text: &str) -> Option<String> {
        first_capture(&self.followers, text).map(|s| s.trim().to_string())
    }

    /// LinkedIn company snippet fields.
    #[must_use]
    pub fn linkedin_insights(&self, text: &str) -> LinkedInInsights {
        LinkedInInsights {
            employees: first_capture(&self.employees, text),
            location: first_capture(&self.location, text).map(|s| s.trim().to_string()),
            specialties: first_capture(&self.specialties, text).map(|list| {
                list.split(',').map(|s| s.trim().to_string()).collect()
            }),
            company_type: first_capture(&self.company_type, text).map(|s| s.trim().to_string()),
        }
    }

    /// Strip `| tagline`, `- tagline` and trailing `Inc` / `LLC` from a result title.
    #[must_use]
    pub fn clean_company_name(&self, title: &str) -> String {
        self.name_suffixes
            .iter()
            .fold(title.to_string(), |name, pattern| {
                pattern.replace(&name, "").into_owned()
            })
            .trim()
            .to_string()
    }
}

/// First capture group of the first matching pattern.
fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
