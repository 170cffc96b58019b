//! Contact extraction from website text.

use super::heuristics::Heuristics;
use super::types::Contact;

/// Append the people, emails and phone numbers found in `text` to `contacts`.
///
/// Emails and phones already known before this call are skipped, as are
/// people whose name is already listed. People come first, then standalone
/// emails, then phones.
pub fn extract_contacts(heuristics: &Heuristics, text: &str, contacts: &mut Vec<Contact>) {
    let emails: Vec<String> = heuristics
        .email
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|email| !contacts.iter().any(|c| c.email.as_ref() == Some(email)))
        .collect();

    let phones: Vec<String> = heuristics
        .phone
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|phone| !contacts.iter().any(|c| c.phone.as_ref() == Some(phone)))
        .collect();

    let named = heuristics
        .name_then_title
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())));
    let titled = heuristics
        .title_then_name
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(2)?.as_str(), caps.get(1)?.as_str())));

    for (name, title) in named.chain(titled) {
        let name = name.trim();
        if !contacts.iter().any(|c| c.name.as_deref() == Some(name)) {
            contacts.push(Contact::person(name, title.trim()));
        }
    }

    contacts.extend(emails.into_iter().map(Contact::email));
    contacts.extend(phones.into_iter().map(Contact::phone));
}
