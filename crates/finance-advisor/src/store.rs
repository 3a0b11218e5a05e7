//! Persistence Traits and In-Memory Stores
//!
//! The engine reaches storage through narrow traits so the in-memory
//! stores used in development and tests can be swapped for a database
//! backend without touching orchestration code.

use uuid::Uuid;

use crate::error::{AdvisorError, Result};
use crate::model::{ChatMessage, FinancialProfile, InvestmentAdvice};

/// Profile persistence. One profile per user.
pub trait ProfileStore: Send + Sync {
    /// Save a new profile; fails if the user already has one
    fn save(&self, profile: &FinancialProfile) -> Result<()>;

    /// Replace an existing profile; fails if the user has none
    fn update(&self, profile: &FinancialProfile) -> Result<()>;

    /// Load the profile for a user
    fn find_by_user(&self, user_id: &str) -> Result<Option<FinancialProfile>>;

    /// Remove the profile for a user; reports whether one existed
    fn delete_by_user(&self, user_id: &str) -> Result<bool>;
}

/// Advice record persistence
pub trait AdviceStore: Send + Sync {
    /// Save a new advice record
    fn save(&self, advice: &InvestmentAdvice) -> Result<()>;

    /// Overwrite an existing advice record
    fn update(&self, advice: &InvestmentAdvice) -> Result<()>;

    /// Load one advice record, scoped to its owner
    fn find(&self, id: Uuid, user_id: &str) -> Result<Option<InvestmentAdvice>>;

    /// All advice for a user, newest first
    fn list_for_user(&self, user_id: &str) -> Result<Vec<InvestmentAdvice>>;

    /// How many advice records a user has
    fn count_for_user(&self, user_id: &str) -> Result<usize>;

    /// Delete all advice for a user; returns the number removed
    fn delete_for_user(&self, user_id: &str) -> Result<usize>;

    /// Every stored record, for maintenance passes
    fn all(&self) -> Result<Vec<InvestmentAdvice>>;
}

/// Chat transcript persistence
pub trait ChatStore: Send + Sync {
    /// Save a new message
    fn save(&self, message: &ChatMessage) -> Result<()>;

    /// Overwrite an existing message
    fn update(&self, message: &ChatMessage) -> Result<()>;

    /// Full transcript for a user, oldest first
    fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatMessage>>;

    /// Delete the transcript for a user; returns the number removed
    fn delete_for_user(&self, user_id: &str) -> Result<usize>;

    /// Every stored message, for maintenance passes
    fn all(&self) -> Result<Vec<ChatMessage>>;
}

/// In-memory profile store (for development/testing)
pub struct MemoryProfileStore {
    profiles: std::sync::RwLock<std::collections::HashMap<String, FinancialProfile>>,
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn save(&self, profile: &FinancialProfile) -> Result<()> {
        let mut profiles = self.profiles.write().unwrap();
        if profiles.contains_key(&profile.user_id) {
            return Err(AdvisorError::ProfileExists);
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    fn update(&self, profile: &FinancialProfile) -> Result<()> {
        let mut profiles = self.profiles.write().unwrap();
        if !profiles.contains_key(&profile.user_id) {
            return Err(AdvisorError::ProfileNotFound);
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    fn find_by_user(&self, user_id: &str) -> Result<Option<FinancialProfile>> {
        let profiles = self.profiles.read().unwrap();
        Ok(profiles.get(user_id).cloned())
    }

    fn delete_by_user(&self, user_id: &str) -> Result<bool> {
        let mut profiles = self.profiles.write().unwrap();
        Ok(profiles.remove(user_id).is_some())
    }
}

/// In-memory advice store (for development/testing)
pub struct MemoryAdviceStore {
    records: std::sync::RwLock<std::collections::HashMap<Uuid, InvestmentAdvice>>,
}

impl Default for MemoryAdviceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAdviceStore {
    pub fn new() -> Self {
        Self {
            records: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

impl AdviceStore for MemoryAdviceStore {
    fn save(&self, advice: &InvestmentAdvice) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.insert(advice.id, advice.clone());
        Ok(())
    }

    fn update(&self, advice: &InvestmentAdvice) -> Result<()> {
        let mut records = self.records.write().unwrap();
        records.insert(advice.id, advice.clone());
        Ok(())
    }

    fn find(&self, id: Uuid, user_id: &str) -> Result<Option<InvestmentAdvice>> {
        let records = self.records.read().unwrap();
        Ok(records
            .get(&id)
            .filter(|advice| advice.user_id == user_id)
            .cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<InvestmentAdvice>> {
        let records = self.records.read().unwrap();
        let mut result: Vec<_> = records
            .values()
            .filter(|advice| advice.user_id == user_id)
            .cloned()
            .collect();

        // Sort by created_at descending
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    fn count_for_user(&self, user_id: &str) -> Result<usize> {
        let records = self.records.read().unwrap();
        Ok(records
            .values()
            .filter(|advice| advice.user_id == user_id)
            .count())
    }

    fn delete_for_user(&self, user_id: &str) -> Result<usize> {
        let mut records = self.records.write().unwrap();
        let before = records.len();
        records.retain(|_, advice| advice.user_id != user_id);
        Ok(before - records.len())
    }

    fn all(&self) -> Result<Vec<InvestmentAdvice>> {
        let records = self.records.read().unwrap();
        Ok(records.values().cloned().collect())
    }
}

/// In-memory chat store (for development/testing)
pub struct MemoryChatStore {
    messages: std::sync::RwLock<std::collections::HashMap<Uuid, ChatMessage>>,
}

impl Default for MemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self {
            messages: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

impl ChatStore for MemoryChatStore {
    fn save(&self, message: &ChatMessage) -> Result<()> {
        let mut messages = self.messages.write().unwrap();
        messages.insert(message.id, message.clone());
        Ok(())
    }

    fn update(&self, message: &ChatMessage) -> Result<()> {
        let mut messages = self.messages.write().unwrap();
        messages.insert(message.id, message.clone());
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().unwrap();
        let mut result: Vec<_> = messages
            .values()
            .filter(|msg| msg.user_id == user_id)
            .cloned()
            .collect();

        // Sort by timestamp ascending
        result.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(result)
    }

    fn delete_for_user(&self, user_id: &str) -> Result<usize> {
        let mut messages = self.messages.write().unwrap();
        let before = messages.len();
        messages.retain(|_, msg| msg.user_id != user_id);
        Ok(before - messages.len())
    }

    fn all(&self) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().unwrap();
        Ok(messages.values().cloned().collect())
    }
}
