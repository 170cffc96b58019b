//! Technology detection from raw page source.

use super::types::TechnologyMap;

/// Technology catalogue, category by category.
pub const CATALOGUE: &[(&str, &[&str])] = &[
    (
        "Frontend",
        &["React", "Angular", "Vue.js", "Next.js", "Nuxt.js", "jQuery", "Bootstrap", "Tailwind"],
    ),
    (
        "Backend",
        &["Node.js", "Python", "Java", "PHP", "Ruby", "Go", "Django", "Flask", "Spring", "Laravel"],
    ),
    (
        "Database",
        &["MySQL", "PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "Oracle", "SQL Server"],
    ),
    (
        "Cloud",
        &["AWS", "Azure", "Google Cloud", "Heroku", "DigitalOcean", "Cloudflare"],
    ),
    (
        "Analytics",
        &["Google Analytics", "Mixpanel", "Amplitude", "Segment", "Hotjar"],
    ),
];

/// Detect catalogue entries mentioned anywhere in `html`.
///
/// Matching is a case-insensitive substring test on the raw source, so a
/// script URL or class name counts as much as visible text. Categories with
/// no hit are left out.
#[must_use]
pub fn detect_technologies(html: &str) -> TechnologyMap {
    let source = html.to_lowercase();

    CATALOGUE
        .iter()
        .filter_map(|(category, technologies)| {
            let found: Vec<String> = technologies
                .iter()
                .filter(|tech| source.contains(&tech.to_lowercase()))
                .map(|tech| (*tech).to_string())
                .collect();
            (!found.is_empty()).then(|| ((*category).to_string(), found))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_technologies() {
        let html = r#"<html><head>
            <script src="https://cdn.example/jquery.min.js"></script>
            <script src="https://www.googletagmanager.com/gtag/js"></script>
            <!-- Google Analytics -->
            <link href="/static/bootstrap.css" rel="stylesheet">
            </head><body>Powered by Heroku</body></html>"#;

        let found = detect_technologies(html);

        assert_eq!(
            found.get("Frontend"),
            Some(&vec!["jQuery".to_string(), "Bootstrap".to_string()])
        );
        assert_eq!(found.get("Cloud"), Some(&vec!["Heroku".to_string()]));
        assert!(
            found
                .get("Analytics")
                .is_some_and(|tools| tools.contains(&"Google Analytics".to_string()))
        );
        assert!(!found.contains_key("Database"));
    }

    #[test]
    fn test_categories_follow_catalogue_order() {
        let html = "<p>Hotjar on AWS, built with React</p>";

        let found = detect_technologies(html);
        let categories: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(categories, ["Frontend", "Cloud", "Analytics"]);

        let json = serde_json::to_string(&found).unwrap_or_default();
        assert_eq!(
            json,
            r#"{"Frontend":["React"],"Cloud":["AWS"],"Analytics":["Hotjar"]}"#
        );
    }

    #[test]
    fn test_nothing_detected() {
        assert!(detect_technologies("<p>hi</p>").is_empty());
    }
}
