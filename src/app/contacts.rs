use crate::domain::model::{Contact, ContactDraft, RecordId};
use crate::domain::ports::ContactService;
use crate::utils::error::{FinboardError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_phone, Validate};

impl Validate for ContactDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_email("email", self.email.trim())?;
        validate_phone("phone", &self.phone)?;
        Ok(())
    }
}

/// Contacts page state: the loaded list plus the results of the current search.
pub struct ContactBook<'a, S: ContactService + ?Sized> {
    service: &'a S,
    contacts: Vec<Contact>,
    results: Vec<Contact>,
    query: String,
}

impl<'a, S: ContactService + ?Sized> ContactBook<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            contacts: Vec::new(),
            results: Vec::new(),
            query: String::new(),
        }
    }

    /// Every loaded contact, whatever the search shows.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// What the page shows: search results, or everything when there is no query.
    pub fn visible(&self) -> &[Contact] {
        if self.query.is_empty() {
            &self.contacts
        } else {
            &self.results
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn load(&mut self) -> &[Contact] {
        self.contacts = self.service.list("").await;
        self.refresh_results().await;
        self.visible()
    }

    /// A blank query shows every loaded contact; anything else goes to fuzzy search.
    pub async fn search(&mut self, query: &str) -> &[Contact] {
        self.query = query.trim().to_string();
        self.refresh_results().await;
        tracing::debug!(
            "Search '{}' matched {} contacts",
            self.query,
            self.visible().len()
        );
        self.visible()
    }

    async fn refresh_results(&mut self) {
        self.results = if self.query.is_empty() {
            self.contacts.clone()
        } else {
            self.service.fuzzy_search(&self.query).await
        };
    }

    pub async fn create(&mut self, draft: ContactDraft) -> Result<&Contact> {
        draft.validate()?;
        let created = self.service.create(&draft).await;
        tracing::info!("Added contact '{}' ({})", created.name, created.id);
        self.contacts.push(created);
        self.refresh_results().await;
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    pub async fn update(&mut self, id: RecordId, draft: ContactDraft) -> Result<&Contact> {
        draft.validate()?;
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FinboardError::ValidationError {
                message: format!("no contact with id {}", id),
            })?;

        self.contacts[index] = self.service.update(id, &draft).await;
        self.refresh_results().await;
        Ok(&self.contacts[index])
    }

    /// Drops the contact locally; returns whether the service confirmed it.
    pub async fn delete(&mut self, id: RecordId) -> bool {
        let confirmed = self.service.delete(id).await;
        if !confirmed {
            tracing::warn!("Contact {} was not deleted on the server", id);
        }
        self.contacts.retain(|c| c.id != id);
        self.refresh_results().await;
        confirmed
    }
}
