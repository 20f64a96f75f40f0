//! Store health port

use async_trait::async_trait;

use crate::error::DomainError;

/// A backing store that can be pinged
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name shown in the health report
    fn name(&self) -> &'static str;

    async fn ping(&self) -> Result<(), DomainError>;
}
