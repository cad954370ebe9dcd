use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::model::{employee::Employee, role::Role};

/// Read-only employee lookup used for every authorization decision. Unknown
/// ids always surface as a failure upstream; a role is never defaulted.
pub trait Directory {
    fn resolve(&self, id: u64) -> Option<&Employee>;
    fn find_by_email(&self, email: &str) -> Option<&Employee>;
    fn all(&self) -> &[Employee];
}

pub struct InMemoryDirectory {
    employees: Vec<Employee>,
}

impl InMemoryDirectory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Parses a JSON array of employee records.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let employees: Vec<Employee> =
            serde_json::from_str(raw).context("invalid employee directory JSON")?;
        Ok(Self::new(employees))
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read directory file {}", path.display()))?;
        let dir = Self::from_json(&raw)?;
        info!(count = dir.employees.len(), file = %path.display(), "Loaded employee directory");
        Ok(dir)
    }

    /// Built-in roster used when no DIRECTORY_FILE is configured.
    pub fn default_roster() -> Self {
        Self::new(vec![
            Employee {
                id: 1,
                name: "John Doe".into(),
                email: "john.doe@company.com".into(),
                role: Role::Employee,
            },
            Employee {
                id: 2,
                name: "Jane Smith".into(),
                email: "jane.smith@company.com".into(),
                role: Role::Employee,
            },
            Employee {
                id: 3,
                name: "Mary Manager".into(),
                email: "mary.manager@company.com".into(),
                role: Role::Manager,
            },
        ])
    }
}

impl Directory for InMemoryDirectory {
    fn resolve(&self, id: u64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    fn find_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
    }

    fn all(&self) -> &[Employee] {
        &self.employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_ids_only() {
        let dir = InMemoryDirectory::default_roster();
        assert_eq!(dir.resolve(3).unwrap().role, Role::Manager);
        assert!(dir.resolve(999).is_none());
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let dir = InMemoryDirectory::default_roster();
        let hit = dir.find_by_email("JOHN.DOE@company.com").unwrap();
        assert_eq!(hit.id, 1);
        assert!(dir.find_by_email("nobody@company.com").is_none());
    }

    #[test]
    fn parses_directory_json() {
        let raw = r#"[
            {"id": 7, "name": "Ana", "email": "ana@co.com", "role": "Manager"}
        ]"#;
        let dir = InMemoryDirectory::from_json(raw).unwrap();
        assert_eq!(dir.all().len(), 1);
        assert!(dir.resolve(7).unwrap().role.is_manager());
        assert!(InMemoryDirectory::from_json("{not json").is_err());
    }
}
