#[derive(Clone)]
pub struct Config {
    pub port: u16,

    /// Symmetric key for the identity header codec. The trusted gateway
    /// encrypts the caller's email with the same key once at login and echoes
    /// the token on every request.
    pub identity_secret_key: String,

    // Classification defaults assigned at registration. Both must resolve to
    // existing records or registration fails.
    pub default_role_id: String,
    pub default_event_level: String,

    /// Role id allowed through the /admin gate.
    pub admin_role_id: String,

    /// Fallback page size for listing endpoints.
    pub page_size: u64,
}
