//! Company profile types.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Social platforms a profile tracks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    /// LinkedIn company page.
    LinkedIn,
    /// Twitter / X account.
    Twitter,
    /// Facebook page.
    Facebook,
    /// Instagram account.
    Instagram,
}

impl SocialPlatform {
    /// Platforms searched through `site:` queries, in search order.
    pub const SEARCHED: [Self; 3] = [Self::Facebook, Self::Twitter, Self::Instagram];

    /// Key used in `social_profiles` and `social_data`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }

    /// Site domain.
    #[must_use]
    pub const fn domain(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin.com",
            Self::Twitter => "twitter.com",
            Self::Facebook => "facebook.com",
            Self::Instagram => "instagram.com",
        }
    }
}

/// Domains whose links are social profiles rather than a company website.
pub const SOCIAL_DOMAINS: [&str; 3] = ["linkedin.com", "facebook.com", "twitter.com"];

/// A person or channel found on the company website.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Person name.
    pub name: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl Contact {
    /// A named person with a title.
    #[must_use]
    pub fn person(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// A standalone email address.
    #[must_use]
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// A standalone phone number.
    #[must_use]
    pub fn phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Self::default()
        }
    }
}

/// What a `site:` search revealed about one social account.
///
/// Serializes as `{}` until something was found, then with all three keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformPresence {
    /// Account URL.
    pub url: Option<String>,
    /// Follower count as written in the snippet (`12k`, `1,204`).
    pub followers: Option<String>,
    /// Lowercased snippet.
    pub description: Option<String>,
}

impl PlatformPresence {
    /// Whether no field was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.url.is_none() && self.followers.is_none() && self.description.is_none()
    }
}

impl Serialize for PlatformPresence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_struct("PlatformPresence", 0)?.end();
        }
        let mut state = serializer.serialize_struct("PlatformPresence", 3)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("followers", &self.followers)?;
        state.serialize_field("description", &self.description)?;
        state.end()
    }
}

/// Fields read from a LinkedIn company page snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInInsights {
    /// Employee count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<String>,
    /// Location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Specialties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    /// Company type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
}

/// Per-platform social data; every platform key is always present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialData {
    /// LinkedIn insights.
    pub linkedin: LinkedInInsights,
    /// Twitter presence.
    pub twitter: PlatformPresence,
    /// Facebook presence.
    pub facebook: PlatformPresence,
    /// Instagram presence.
    pub instagram: PlatformPresence,
}

impl SocialData {
    /// Presence slot of a searched platform.
    pub fn presence_mut(&mut self, platform: SocialPlatform) -> Option<&mut PlatformPresence> {
        match platform {
            SocialPlatform::Twitter => Some(&mut self.twitter),
            SocialPlatform::Facebook => Some(&mut self.facebook),
            SocialPlatform::Instagram => Some(&mut self.instagram),
            SocialPlatform::LinkedIn => None,
        }
    }
}

/// Technology category → detected technology names, in catalogue order.
pub type TechnologyMap = IndexMap<String, Vec<String>>;

/// Best-guess company profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Name the profile was requested for.
    pub name: String,
    /// Official website.
    pub website: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Industry.
    pub industry: Option<String>,
    /// Headcount as written in the source.
    pub company_size: Option<String>,
    /// Revenue as written in the source.
    pub revenue: Option<String>,
    /// Headquarters.
    pub headquarters: Option<String>,
    /// Founding date.
    pub founded: Option<String>,
    /// Contacts found on the website.
    pub contacts: Vec<Contact>,
    /// Platform (or domain) → profile URL.
    pub social_profiles: BTreeMap<String, String>,
    /// Per-platform social data.
    pub social_data: SocialData,
    /// Technologies detected on the website.
    pub technologies: TechnologyMap,
}

impl CompanyProfile {
    /// Empty profile for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fold one source's findings into the profile.
    ///
    /// Found values replace earlier guesses, except the website where the
    /// first one found is kept.
    pub fn absorb(&mut self, findings: SourceFindings) {
        if self.website.is_none() {
            self.website = findings.website;
        }

        let fields = [
            (&mut self.description, findings.description),
            (&mut self.industry, findings.industry),
            (&mut self.company_size, findings.company_size),
            (&mut self.revenue, findings.revenue),
            (&mut self.headquarters, findings.headquarters),
            (&mut self.founded, findings.founded),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                *slot = value;
            }
        }

        self.social_profiles.extend(findings.social_profiles);

        for (platform, presence) in findings.presence {
            if let Some(slot) = self.social_data.presence_mut(platform) {
                *slot = presence;
            }
        }

        if let Some(linkedin) = findings.linkedin {
            self.social_data.linkedin = linkedin;
        }
    }

    /// Drop duplicate contacts and normalise social profile keys.
    pub fn clean(&mut self) {
        let mut seen = HashSet::new();
        self.contacts.retain(|contact| seen.insert(contact.clone()));

        let (canonical, by_domain): (Vec<_>, Vec<_>) = std::mem::take(&mut self.social_profiles)
            .into_iter()
            .partition(|(key, _)| is_platform_key(key));

        self.social_profiles.extend(canonical);
        for (domain, url) in by_domain {
            self.social_profiles
                .entry(platform_for_domain(&domain))
                .or_insert(url);
        }
    }
}

fn is_platform_key(key: &str) -> bool {
    [
        SocialPlatform::LinkedIn,
        SocialPlatform::Twitter,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
    ]
    .iter()
    .any(|platform| platform.key() == key)
}

/// Platform key for a link domain, or the domain itself.
#[must_use]
pub fn platform_for_domain(domain: &str) -> String {
    ["linkedin", "facebook", "twitter"]
        .iter()
        .find(|name| domain.contains(*name))
        .map_or_else(|| domain.to_string(), |name| (*name).to_string())
}

/// Partial profile produced by one data source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFindings {
    /// Website guess.
    pub website: Option<String>,
    /// Description guess.
    pub description: Option<String>,
    /// Industry guess.
    pub industry: Option<String>,
    /// Headcount guess.
    pub company_size: Option<String>,
    /// Revenue guess.
    pub revenue: Option<String>,
    /// Headquarters guess.
    pub headquarters: Option<String>,
    /// Founding date guess.
    pub founded: Option<String>,
    /// Social profile links keyed by platform or domain.
    pub social_profiles: Vec<(String, String)>,
    /// Social presence per searched platform.
    pub presence: Vec<(SocialPlatform, PlatformPresence)>,
    /// LinkedIn insights.
    pub linkedin: Option<LinkedInInsights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_shape() {
        let profile = CompanyProfile::new("Acme");
        let json = serde_json::to_value(&profile).unwrap_or_default();

        assert_eq!(json["name"], "Acme");
        assert!(json["website"].is_null());
        assert_eq!(json["contacts"], serde_json::json!([]));
        assert_eq!(json["technologies"], serde_json::json!({}));
        assert_eq!(
            json["social_data"],
            serde_json::json!({"linkedin": {}, "twitter": {}, "facebook": {}, "instagram": {}})
        );
    }

    #[test]
    fn test_found_presence_keeps_null_fields() {
        let presence = PlatformPresence {
            url: Some("https://twitter.com/acme".to_string()),
            followers: None,
            description: Some("acme on twitter".to_string()),
        };
        let json = serde_json::to_value(&presence).unwrap_or_default();

        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://twitter.com/acme",
                "followers": null,
                "description": "acme on twitter",
            })
        );
        let empty = serde_json::to_value(PlatformPresence::default()).unwrap_or_default();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn test_absorb_overwrites_but_keeps_first_website() {
        let mut profile = CompanyProfile::new("Acme");
        profile.absorb(SourceFindings {
            website: Some("https://acme.example".to_string()),
            industry: Some("widgets".to_string()),
            revenue: Some("$2 billion".to_string()),
            ..SourceFindings::default()
        });
        profile.absorb(SourceFindings {
            website: Some("https://other.example".to_string()),
            industry: Some("Industrial Machinery".to_string()),
            ..SourceFindings::default()
        });

        assert_eq!(profile.website.as_deref(), Some("https://acme.example"));
        assert_eq!(profile.industry.as_deref(), Some("Industrial Machinery"));
        assert_eq!(profile.revenue.as_deref(), Some("$2 billion"));
    }

    #[test]
    fn test_absorb_social_data() {
        let mut profile = CompanyProfile::new("Acme");
        let presence = PlatformPresence {
            url: Some("https://twitter.com/acme".to_string()),
            followers: Some("12k".to_string()),
            description: None,
        };
        profile.absorb(SourceFindings {
            presence: vec![(SocialPlatform::Twitter, presence.clone())],
            social_profiles: vec![("twitter".to_string(), "https://twitter.com/acme".to_string())],
            linkedin: Some(LinkedInInsights {
                employees: Some("501".to_string()),
                ..LinkedInInsights::default()
            }),
            ..SourceFindings::default()
        });

        assert_eq!(profile.social_data.twitter, presence);
        assert_eq!(profile.social_data.linkedin.employees.as_deref(), Some("501"));
        assert_eq!(profile.social_profiles.len(), 1);
    }

    #[test]
    fn test_clean_dedupes_contacts() {
        let mut profile = CompanyProfile::new("Acme");
        profile.contacts = vec![
            Contact::email("info@acme.example"),
            Contact::person("Jane Doe", "CEO"),
            Contact::email("info@acme.example"),
        ];
        profile.clean();
        assert_eq!(
            profile.contacts,
            vec![Contact::email("info@acme.example"), Contact::person("Jane Doe", "CEO")]
        );
    }

    #[test]
    fn test_clean_normalises_social_keys() {
        let mut profile = CompanyProfile::new("Acme");
        profile
            .social_profiles
            .insert("www.linkedin.com".to_string(), "https://www.linkedin.com/company/acme-old".to_string());
        profile
            .social_profiles
            .insert("linkedin".to_string(), "https://www.linkedin.com/company/acme".to_string());
        profile
            .social_profiles
            .insert("m.facebook.com".to_string(), "https://m.facebook.com/acme".to_string());
        profile
            .social_profiles
            .insert("vimeo.com".to_string(), "https://vimeo.com/acme".to_string());

        profile.clean();

        assert_eq!(
            profile.social_profiles.get("linkedin").map(String::as_str),
            Some("https://www.linkedin.com/company/acme")
        );
        assert_eq!(
            profile.social_profiles.get("facebook").map(String::as_str),
            Some("https://m.facebook.com/acme")
        );
        assert!(profile.social_profiles.contains_key("vimeo.com"));
        assert_eq!(profile.social_profiles.len(), 3);
    }

    #[test]
    fn test_platform_for_domain() {
        assert_eq!(platform_for_domain("twitter.com"), "twitter");
        assert_eq!(platform_for_domain("youtube.com"), "youtube.com");
    }
}
