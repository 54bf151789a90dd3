// Notifier Port - user-facing alerts

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show `message` to the user
    fn alert(&self, message: &str);
}
