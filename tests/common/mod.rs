//! Shared test helpers: an in-process fake of the remote vault service.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use pwvault::api::VaultService;
use pwvault::errors::{PwVaultError, Result};
use pwvault::vault::{Category, CategoryId, Credential, CredentialId, DraftCredential};

pub const MASTER: &str = "admin123";

/// Behaves like the real service: one master password, server-assigned
/// ids, full lists on every read. Every call is recorded by name.
pub struct FakeService {
    master_password: String,
    pub online: Cell<bool>,
    pub reject_writes: Cell<bool>,
    pub generated: RefCell<Option<String>>,
    pub credentials: RefCell<Vec<Credential>>,
    pub categories: RefCell<Vec<Category>>,
    calls: RefCell<Vec<&'static str>>,
    next_id: Cell<u64>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            master_password: MASTER.to_string(),
            online: Cell::new(true),
            reject_writes: Cell::new(false),
            generated: RefCell::new(Some("Gen3rated!Pass#16".to_string())),
            credentials: RefCell::new(Vec::new()),
            categories: RefCell::new(vec![
                Category {
                    id: CategoryId(1),
                    name: "Email".to_string(),
                },
                Category {
                    id: CategoryId(2),
                    name: "Work".to_string(),
                },
            ]),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Store a credential directly on the "server", as another client would.
    pub fn seed(&self, name: &str, category: Option<u64>) -> CredentialId {
        let id = self.allocate_id();
        self.credentials.borrow_mut().push(Credential {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            url: None,
            category_id: category.map(CategoryId),
            category_name: None,
            password: "seeded".to_string(),
            created_at: None,
        });
        id
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn allocate_id(&self) -> CredentialId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        CredentialId(id)
    }

    fn record(&self, name: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(name);
        if self.online.get() {
            Ok(())
        } else {
            Err(PwVaultError::NetworkFailure("connection refused".into()))
        }
    }

    fn authorize(&self, master_password: &str) -> Result<()> {
        if master_password == self.master_password {
            Ok(())
        } else {
            Err(PwVaultError::RemoteRejected(401))
        }
    }

    fn writable(&self) -> Result<()> {
        if self.reject_writes.get() {
            Err(PwVaultError::RemoteRejected(500))
        } else {
            Ok(())
        }
    }
}

impl VaultService for FakeService {
    fn validate_master_password(&self, master_password: &str) -> Result<()> {
        self.record("validate")?;
        if master_password == self.master_password {
            Ok(())
        } else {
            Err(PwVaultError::AuthRejected)
        }
    }

    fn list_credentials(&self, master_password: &str) -> Result<Vec<Credential>> {
        self.record("list_credentials")?;
        self.authorize(master_password)?;
        Ok(self.credentials.borrow().clone())
    }

    fn list_categories(&self, master_password: &str) -> Result<Vec<Category>> {
        self.record("list_categories")?;
        self.authorize(master_password)?;
        Ok(self.categories.borrow().clone())
    }

    fn generate_password(&self) -> Result<String> {
        self.record("generate")?;
        self.generated
            .borrow()
            .clone()
            .ok_or(PwVaultError::RemoteRejected(503))
    }

    fn create_credential(&self, master_password: &str, draft: &DraftCredential) -> Result<()> {
        self.record("create_credential")?;
        self.authorize(master_password)?;
        self.writable()?;

        let category_name = draft.category_id.and_then(|id| {
            self.categories
                .borrow()
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        });
        let id = self.allocate_id();
        self.credentials.borrow_mut().push(Credential {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            url: draft.url_or_none().map(str::to_string),
            category_id: draft.category_id,
            category_name,
            password: draft.password.clone(),
            created_at: Some("2024-01-01 00:00:00".to_string()),
        });
        Ok(())
    }

    fn delete_credential(&self, master_password: &str, id: CredentialId) -> Result<()> {
        self.record("delete_credential")?;
        self.authorize(master_password)?;
        self.writable()?;
        self.credentials.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }

    fn create_category(&self, master_password: &str, name: &str) -> Result<()> {
        self.record("create_category")?;
        self.authorize(master_password)?;
        self.writable()?;

        let next = self.categories.borrow().iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        self.categories.borrow_mut().push(Category {
            id: CategoryId(next),
            name: name.to_string(),
        });
        Ok(())
    }
}
