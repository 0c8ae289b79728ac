use crate::editors::{trim_in_place, Checker, EditorError};
use crate::models::resume::{ContactInfo, PersonalLink};
use crate::models::section::SectionId;

const MIN_PHONE_CHARS: usize = 8;
const MAX_SUMMARY_CHARS: usize = 500;
const MAX_PERSONAL_LINKS: usize = 10;

pub fn validate_contact(mut contact: ContactInfo) -> Result<ContactInfo, EditorError> {
    for field in [
        &mut contact.first_name,
        &mut contact.last_name,
        &mut contact.email,
        &mut contact.phone_number,
        &mut contact.address,
        &mut contact.city,
        &mut contact.state,
        &mut contact.country,
        &mut contact.postal_code,
    ] {
        trim_in_place(field);
    }

    let mut check = Checker::new(SectionId::Contact, "contactInfo");
    check.require(None, "firstName", &contact.first_name);
    check.require(None, "lastName", &contact.last_name);
    check.require(None, "email", &contact.email);
    check.require(None, "phoneNumber", &contact.phone_number);

    if !contact.email.is_empty() && !is_email_shaped(&contact.email) {
        check.fail(None, "email", "must look like name@domain.tld");
    }
    let phone_len = contact.phone_number.chars().count();
    if phone_len > 0 && phone_len < MIN_PHONE_CHARS {
        check.fail(
            None,
            "phoneNumber",
            format!("must be at least {MIN_PHONE_CHARS} characters"),
        );
    }
    check.finish(contact)
}

pub fn validate_summary(summary: Option<String>) -> Result<String, EditorError> {
    let summary = summary.unwrap_or_default().trim().to_string();
    let mut check = Checker::new(SectionId::Summary, "summary");
    if summary.is_empty() {
        check.fail(None, "", "is required");
    }
    if summary.chars().count() > MAX_SUMMARY_CHARS {
        check.fail(
            None,
            "",
            format!("must be at most {MAX_SUMMARY_CHARS} characters"),
        );
    }
    check.finish(summary)
}

/// Rows missing a platform or url are dropped; at least one must survive.
pub fn validate_personal_links(links: Vec<PersonalLink>) -> Result<Vec<PersonalLink>, EditorError> {
    let mut check = Checker::new(SectionId::PersonalLinks, "personalLinkList");
    check.max_entries(links.len(), MAX_PERSONAL_LINKS);

    let links: Vec<PersonalLink> = links
        .into_iter()
        .map(|mut link| {
            trim_in_place(&mut link.platform);
            trim_in_place(&mut link.url);
            link
        })
        .filter(|link| !link.platform.is_empty() && !link.url.is_empty())
        .collect();

    if links.is_empty() {
        check.fail(None, "", "needs at least one link with a platform and url");
    }
    check.finish(links)
}

/// `local@domain.tld`: one `@`, no whitespace, a dotted domain with non-empty labels
/// and a top-level label of two or more letters.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    let Some(tld) = labels.last() else {
        return false;
    };
    labels.len() >= 2
        && labels.iter().all(|l| !l.is_empty())
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
