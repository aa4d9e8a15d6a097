//! Customers and the feedback they leave.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::{unknown_reference, Draft, Entity};
use super::error::{required, ConstraintError};
use super::id::Id;
use super::schema::Table;

/// Customer details such as name, contact information, and address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Id<Customer>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    /// Start a draft with the required name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Draft for NewCustomer {
    const TABLE: Table = Table::Customer;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        Ok(())
    }
}

impl Entity for Customer {
    type Draft = NewCustomer;
    const TABLE: Table = Table::Customer;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

/// Feedback a customer left about products and services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerFeedback {
    pub id: Id<CustomerFeedback>,
    pub customer_id: Id<Customer>,
    pub feedback_date: Option<NaiveDateTime>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewCustomerFeedback {
    pub customer_id: Option<Id<Customer>>,
    pub feedback_date: Option<NaiveDateTime>,
    pub comments: Option<String>,
}

impl Draft for NewCustomerFeedback {
    const TABLE: Table = Table::CustomerFeedback;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.customer_id, Self::TABLE, "customer_id")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("customer_id", self.customer_id.map(Id::get))]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "customer_id" => self.customer_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for CustomerFeedback {
    type Draft = NewCustomerFeedback;
    const TABLE: Table = Table::CustomerFeedback;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("customer_id", Some(self.customer_id.get()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_requires_name() {
        assert_eq!(
            NewCustomer::default().validate(),
            Err(ConstraintError::NotNull {
                table: Table::Customer,
                column: "name"
            })
        );
        assert!(NewCustomer::named("Ada").validate().is_ok());
    }

    #[test]
    fn customer_draft_rejects_unknown_fields() {
        let result: Result<NewCustomer, _> =
            serde_json::from_str(r#"{"name":"Ada","nickname":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_json_field_decodes_as_unset() {
        let draft: NewCustomer = serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert!(draft.name.is_none());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn feedback_reference_can_be_set_and_cleared() {
        let mut draft = NewCustomerFeedback::default();
        draft.set_reference("customer_id", Some(4)).unwrap();
        assert_eq!(draft.customer_id, Some(Id::new(4)));
        assert_eq!(draft.references(), vec![("customer_id", Some(4))]);

        draft.set_reference("customer_id", None).unwrap();
        assert_eq!(
            draft.validate(),
            Err(ConstraintError::NotNull {
                table: Table::CustomerFeedback,
                column: "customer_id"
            })
        );
    }

    #[test]
    fn customer_has_no_references() {
        let mut draft = NewCustomer::named("Ada");
        assert!(draft.references().is_empty());
        assert!(matches!(
            draft.set_reference("customer_id", Some(1)),
            Err(ConstraintError::UnknownReference { .. })
        ));
    }

    #[test]
    fn feedback_date_decodes_iso_timestamp() {
        let draft: NewCustomerFeedback = serde_json::from_str(
            r#"{"customer_id":1,"feedback_date":"2024-10-14T19:25:51","comments":"great"}"#,
        )
        .unwrap();
        assert_eq!(
            draft.feedback_date.unwrap().to_string(),
            "2024-10-14 19:25:51"
        );
    }
}
