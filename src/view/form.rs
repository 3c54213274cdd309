//! Create/edit form state.

use crate::error::{MerchantError, Result};
use crate::models::{Merchant, MerchantFormData, MerchantId, MerchantStatus};

/// An input of the merchant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Business name.
    Name,
    /// Registration number.
    BusinessRegistrationNumber,
    /// Contact email.
    Email,
    /// Contact phone number.
    Phone,
    /// Lifecycle status.
    Status,
}

impl FormField {
    /// Every field, in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::BusinessRegistrationNumber,
        Self::Email,
        Self::Phone,
        Self::Status,
    ];

    /// Wire name of the field, as used in request bodies.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BusinessRegistrationNumber => "business_registration_number",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Status => "status",
        }
    }

    /// Human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Business Name",
            Self::BusinessRegistrationNumber => "Registration Number",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Status => "Status",
        }
    }
}

impl core::str::FromStr for FormField {
    type Err = MerchantError;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| MerchantError::InvalidForm {
                field: "form",
                message: format!("Unknown field: {s}"),
            })
    }
}

/// State of the create/edit form.
///
/// With no edit target the form creates a merchant; with one it updates
/// that merchant. Server-owned fields never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantForm {
    /// Current input values.
    data: MerchantFormData,
    /// Merchant being edited, if any.
    editing: Option<MerchantId>,
    /// Error shown inside the form.
    error: Option<String>,
    /// Whether a submit is in flight.
    submitting: bool,
}

impl MerchantForm {
    /// A blank create form (status `Pending`).
    #[inline]
    #[must_use]
    pub fn create() -> Self {
        Self {
            data: MerchantFormData::default(),
            editing: None,
            error: None,
            submitting: false,
        }
    }

    /// An edit form pre-filled from `merchant`.
    #[inline]
    #[must_use]
    pub fn edit(merchant: &Merchant) -> Self {
        Self {
            data: MerchantFormData::from(merchant),
            editing: Some(merchant.id),
            error: None,
            submitting: false,
        }
    }

    /// Current input values.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &MerchantFormData {
        &self.data
    }

    /// The merchant being edited, if this is an edit form.
    #[inline]
    #[must_use]
    pub const fn editing(&self) -> Option<MerchantId> {
        self.editing
    }

    /// The form's own error message, if the last submit failed.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submit is in flight.
    #[inline]
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Heading of the form.
    #[inline]
    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Merchant"
        } else {
            "Create New Merchant"
        }
    }

    /// Label of the submit button.
    #[inline]
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Saving..."
        } else if self.editing.is_some() {
            "Update Merchant"
        } else {
            "Create Merchant"
        }
    }

    /// Sets one input from its text value.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::InvalidForm`] if `field` is
    /// [`FormField::Status`] and `value` names no status.
    #[inline]
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<()> {
        match field {
            FormField::Name => value.clone_into(&mut self.data.name),
            FormField::BusinessRegistrationNumber => {
                value.clone_into(&mut self.data.business_registration_number);
            }
            FormField::Email => value.clone_into(&mut self.data.email),
            FormField::Phone => value.clone_into(&mut self.data.phone),
            FormField::Status => {
                self.data.status = value
                    .parse::<MerchantStatus>()
                    .map_err(|err| MerchantError::InvalidForm {
                        field: field.name(),
                        message: err.to_string(),
                    })?;
            }
        }
        Ok(())
    }

    /// Checks that every text input is non-empty. Whitespace counts as
    /// filled in; the backend judges the content.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::InvalidForm`] naming the first empty field.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        let inputs = [
            (FormField::Name, &self.data.name),
            (
                FormField::BusinessRegistrationNumber,
                &self.data.business_registration_number,
            ),
            (FormField::Email, &self.data.email),
            (FormField::Phone, &self.data.phone),
        ];
        match inputs.iter().find(|&&(_, value)| value.is_empty()) {
            Some(&(field, _)) => Err(MerchantError::InvalidForm {
                field: field.name(),
                message: format!("{} is required", field.label()),
            }),
            None => Ok(()),
        }
    }

    /// Validates and marks the form as submitting.
    ///
    /// Returns the edit target and a snapshot of the payload to send.
    ///
    /// # Errors
    ///
    /// Returns the validation error, which is also shown in the form.
    #[inline]
    pub fn begin_submit(&mut self) -> Result<(Option<MerchantId>, MerchantFormData)> {
        if let Err(err) = self.validate() {
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;
        self.submitting = true;
        Ok((self.editing, self.data.clone()))
    }

    /// Records a failed submit; the form stays open with the message.
    #[inline]
    pub fn fail_submit(&mut self, err: &MerchantError) {
        self.submitting = false;
        self.error = Some(err.to_string());
    }
}

impl Default for MerchantForm {
    #[inline]
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A saved merchant to edit.
    fn saved() -> Merchant {
        Merchant {
            id: MerchantId::new(12),
            name: "Initech".to_owned(),
            business_registration_number: "BRN12".to_owned(),
            email: "info@initech.com".to_owned(),
            phone: "+15550100".to_owned(),
            status: MerchantStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_owned(),
            updated_at: "2024-01-02T00:00:00Z".to_owned(),
        }
    }

    /// A create form with every input filled in.
    fn filled() -> MerchantForm {
        let mut form = MerchantForm::create();
        form.set_field(FormField::Name, "Acme").unwrap();
        form.set_field(FormField::BusinessRegistrationNumber, "BRN1").unwrap();
        form.set_field(FormField::Email, "a@b.com").unwrap();
        form.set_field(FormField::Phone, "+100").unwrap();
        form
    }

    #[test]
    fn create_form_is_blank_pending() {
        let form = MerchantForm::create();
        assert_eq!(form.data(), &MerchantFormData::default());
        assert_eq!(form.editing(), None);
        assert_eq!(form.title(), "Create New Merchant");
        assert_eq!(form.submit_label(), "Create Merchant");
    }

    #[test]
    fn edit_form_is_prefilled() {
        let form = MerchantForm::edit(&saved());
        assert_eq!(form.editing(), Some(MerchantId::new(12)));
        assert_eq!(form.data().name, "Initech");
        assert_eq!(form.data().status, MerchantStatus::Active);
        assert_eq!(form.title(), "Edit Merchant");
        assert_eq!(form.submit_label(), "Update Merchant");
    }

    #[test]
    fn field_names_parse() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
        assert!("created_at".parse::<FormField>().is_err());
    }

    #[test]
    fn set_status_parses_name() {
        let mut form = MerchantForm::create();
        form.set_field(FormField::Status, "Suspended").unwrap();
        assert_eq!(form.data().status, MerchantStatus::Suspended);
        let err = form.set_field(FormField::Status, "Closed").unwrap_err();
        assert!(matches!(err, MerchantError::InvalidForm { field: "status", .. }));
        assert_eq!(form.data().status, MerchantStatus::Suspended);
    }

    #[test]
    fn validate_reports_first_empty_field() {
        let mut form = filled();
        form.set_field(FormField::Email, "").unwrap();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, MerchantError::InvalidForm { field: "email", .. }));
        assert_eq!(err.to_string(), "Email Address is required");
    }

    #[test]
    fn whitespace_input_is_left_to_the_backend() {
        let mut form = filled();
        form.set_field(FormField::Phone, "   ").unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn begin_submit_snapshots_payload() {
        let mut form = filled();
        let (editing, data) = form.begin_submit().unwrap();
        assert_eq!(editing, None);
        assert_eq!(data.name, "Acme");
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), "Saving...");
    }

    #[test]
    fn begin_submit_rejects_blank_form() {
        let mut form = MerchantForm::create();
        assert!(form.begin_submit().is_err());
        assert_eq!(form.error(), Some("Business Name is required"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn fail_submit_keeps_form_open_with_message() {
        let mut form = filled();
        let _payload = form.begin_submit().unwrap();
        form.fail_submit(&MerchantError::Api {
            status: 400,
            message: "duplicate".to_owned(),
        });
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("duplicate"));
        assert_eq!(form.data().name, "Acme");
    }
}
