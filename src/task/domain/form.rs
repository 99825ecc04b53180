//! Intake form submitted by an admin to open a task.

use super::{FormField, InvalidFields, PageCount, Platform, RequestType, TaskDomainError};

/// Raw task intake form as submitted by an admin.
///
/// Values are kept as entered; [`TaskForm::validate`] checks every field at
/// once so a rejection names all offending fields together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    job_name: String,
    site_id: String,
    platform: String,
    developer: String,
    type_of_request: String,
    number_of_pages: i64,
    salesforce_link: String,
    comments_required: bool,
    comments: Option<String>,
    additional_comments: Option<String>,
}

impl TaskForm {
    /// Creates a form with the mandatory fields.
    #[must_use]
    pub fn new(
        job_name: impl Into<String>,
        site_id: impl Into<String>,
        platform: impl Into<String>,
        developer: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            site_id: site_id.into(),
            platform: platform.into(),
            developer: developer.into(),
            type_of_request: String::new(),
            number_of_pages: 1,
            salesforce_link: String::new(),
            comments_required: false,
            comments: None,
            additional_comments: None,
        }
    }

    /// Sets the request type label.
    #[must_use]
    pub fn with_type_of_request(mut self, type_of_request: impl Into<String>) -> Self {
        self.type_of_request = type_of_request.into();
        self
    }

    /// Sets the number of pages.
    #[must_use]
    pub const fn with_number_of_pages(mut self, number_of_pages: i64) -> Self {
        self.number_of_pages = number_of_pages;
        self
    }

    /// Sets the Salesforce link.
    #[must_use]
    pub fn with_salesforce_link(mut self, salesforce_link: impl Into<String>) -> Self {
        self.salesforce_link = salesforce_link.into();
        self
    }

    /// Marks comments as required.
    #[must_use]
    pub const fn with_comments_required(mut self, comments_required: bool) -> Self {
        self.comments_required = comments_required;
        self
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the additional comments.
    #[must_use]
    pub fn with_additional_comments(mut self, additional_comments: impl Into<String>) -> Self {
        self.additional_comments = Some(additional_comments.into());
        self
    }

    /// Returns the developer named on the form.
    #[must_use]
    pub fn developer(&self) -> &str {
        &self.developer
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Validation`] naming every missing or
    /// invalid field.
    pub fn validate(self) -> Result<ValidatedTaskForm, TaskDomainError> {
        let mut invalid = Vec::new();

        let job_name = required_text(&self.job_name, FormField::JobName, &mut invalid);
        let site_id = required_text(&self.site_id, FormField::SiteId, &mut invalid);
        let platform = Platform::try_from(self.platform.as_str())
            .map_err(|_| invalid.push(FormField::Platform))
            .ok();
        let developer = required_text(&self.developer, FormField::Developer, &mut invalid);
        let type_of_request = RequestType::try_from(self.type_of_request.as_str())
            .map_err(|_| invalid.push(FormField::TypeOfRequest))
            .ok();
        let number_of_pages = PageCount::new(self.number_of_pages);
        if number_of_pages.is_none() {
            invalid.push(FormField::NumberOfPages);
        }
        let salesforce_link =
            required_text(&self.salesforce_link, FormField::SalesforceLink, &mut invalid)
                .filter(|link| is_http_url(link));
        if salesforce_link.is_none() && !invalid.contains(&FormField::SalesforceLink) {
            invalid.push(FormField::SalesforceLink);
        }
        // Comments are only recorded when the admin marked them required.
        let comments = optional_text(self.comments).filter(|_| self.comments_required);
        if self.comments_required && comments.is_none() {
            invalid.push(FormField::Comments);
        }

        match (
            job_name,
            site_id,
            platform,
            developer,
            type_of_request,
            number_of_pages,
            salesforce_link,
        ) {
            (
                Some(job_name),
                Some(site_id),
                Some(platform),
                Some(developer),
                Some(type_of_request),
                Some(number_of_pages),
                Some(salesforce_link),
            ) if invalid.is_empty() => Ok(ValidatedTaskForm {
                job_name,
                site_id,
                platform,
                developer,
                type_of_request,
                number_of_pages,
                salesforce_link,
                comments_required: self.comments_required,
                comments,
                additional_comments: optional_text(self.additional_comments),
            }),
            _ => Err(TaskDomainError::Validation(InvalidFields::new(invalid))),
        }
    }
}

/// Intake form whose fields have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTaskForm {
    pub(super) job_name: String,
    pub(super) site_id: String,
    pub(super) platform: Platform,
    pub(super) developer: String,
    pub(super) type_of_request: RequestType,
    pub(super) number_of_pages: PageCount,
    pub(super) salesforce_link: String,
    pub(super) comments_required: bool,
    pub(super) comments: Option<String>,
    pub(super) additional_comments: Option<String>,
}

fn required_text(value: &str, field: FormField, invalid: &mut Vec<FormField>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        invalid.push(field);
        return None;
    }
    Some(trimmed.to_owned())
}

/// Trims free text, treating blank input as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

pub(crate) fn is_http_url(value: &str) -> bool {
    ["https://", "http://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && value.len() > scheme.len()
    })
}
