//! Employees and the departments they manage.

use serde::{Deserialize, Serialize};

use super::entity::{unknown_reference, Draft, Entity};
use super::error::{required, ConstraintError};
use super::id::Id;
use super::schema::Table;

/// An employee and their role within the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Id<Employee>,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewEmployee {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl Draft for NewEmployee {
    const TABLE: Table = Table::Employee;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        Ok(())
    }
}

impl Entity for Employee {
    type Draft = NewEmployee;
    const TABLE: Table = Table::Employee;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

/// A department, optionally headed by a manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Id<Department>,
    pub name: String,
    pub manager_id: Option<Id<Employee>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewDepartment {
    pub name: Option<String>,
    pub manager_id: Option<Id<Employee>>,
}

impl Draft for NewDepartment {
    const TABLE: Table = Table::Department;

    // manager_id is nullable: a department may have no manager.
    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("manager_id", self.manager_id.map(Id::get))]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "manager_id" => self.manager_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for Department {
    type Draft = NewDepartment;
    const TABLE: Table = Table::Department;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("manager_id", self.manager_id.map(Id::get))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_without_manager_is_valid() {
        let draft = NewDepartment {
            name: Some("Research".into()),
            manager_id: None,
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.references(), vec![("manager_id", None)]);
    }

    #[test]
    fn department_requires_name() {
        let err = NewDepartment::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "NOT NULL constraint failed: department.name");
    }

    #[test]
    fn employee_role_is_optional() {
        let draft: NewEmployee = serde_json::from_str(r#"{"name":"Grace"}"#).unwrap();
        assert!(draft.validate().is_ok());
        assert!(draft.role.is_none());
    }
}
