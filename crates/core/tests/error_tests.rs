// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finatrack_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn already_exists() {
        let err = CoreError::AlreadyExists("alice@x.com".into());
        assert_eq!(err.to_string(), "Email already exists: alice@x.com");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("bob@x.com".into());
        assert_eq!(err.to_string(), "No account found for bob@x.com");
    }

    #[test]
    fn bad_credential() {
        assert_eq!(CoreError::BadCredential.to_string(), "Wrong password");
    }

    #[test]
    fn no_active_session() {
        assert_eq!(CoreError::NoActiveSession.to_string(), "No active session");
    }

    #[test]
    fn malformed_persisted_state() {
        let err = CoreError::MalformedPersistedState {
            key: "ledger.alice@x.com".into(),
            message: "expected a JSON array".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed persisted state under 'ledger.alice@x.com': expected a JSON array"
        );
    }

    #[test]
    fn mirror_unavailable() {
        let err = CoreError::MirrorUnavailable {
            table: "transactions".into(),
            status: Some(503),
            message: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "Mirror unavailable (transactions): Service Unavailable"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Amount must be a positive number, got 0".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Amount must be a positive number, got 0"
        );
    }

    #[test]
    fn storage_and_config() {
        assert_eq!(
            CoreError::Storage("disk full".into()).to_string(),
            "Storage error: disk full"
        );
        assert_eq!(
            CoreError::Config("bad value".into()).to_string(),
            "Configuration error: bad value"
        );
    }

    #[test]
    fn codec_errors() {
        assert_eq!(
            CoreError::Serialization("x".into()).to_string(),
            "Serialization error: x"
        );
        assert_eq!(
            CoreError::Deserialization("y".into()).to_string(),
            "Deserialization error: y"
        );
    }

    #[test]
    fn network_and_credential() {
        assert_eq!(
            CoreError::Network("timeout".into()).to_string(),
            "Network error: timeout"
        );
        assert_eq!(
            CoreError::Credential("bad salt".into()).to_string(),
            "Credential error: bad salt"
        );
    }
}

// ── User-facing classification ──────────────────────────────────────

mod user_facing {
    use super::*;

    #[test]
    fn form_errors_are_user_facing() {
        assert!(CoreError::AlreadyExists("a@b.com".into()).is_user_facing());
        assert!(CoreError::NotFound("a@b.com".into()).is_user_facing());
        assert!(CoreError::BadCredential.is_user_facing());
        assert!(CoreError::ValidationError("x".into()).is_user_facing());
    }

    #[test]
    fn recovered_errors_are_not_user_facing() {
        let malformed = CoreError::MalformedPersistedState {
            key: "k".into(),
            message: "m".into(),
        };
        let mirror = CoreError::MirrorUnavailable {
            table: "profiles".into(),
            status: None,
            message: "connection refused".into(),
        };
        assert!(!malformed.is_user_facing());
        assert!(!mirror.is_user_facing());
        assert!(!CoreError::Storage("x".into()).is_user_facing());
        assert!(!CoreError::NoActiveSession.is_user_facing());
    }
}

// ── From conversions ────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Storage(ref m) if m.contains("denied")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_config_error() {
        let cfg_err = config::ConfigError::Message("missing field".into());
        let err: CoreError = cfg_err.into();
        assert!(matches!(err, CoreError::Config(ref m) if m.contains("missing field")));
    }

    #[test]
    fn from_password_hash_error() {
        let err: CoreError = argon2::password_hash::Error::Password.into();
        assert!(matches!(err, CoreError::Credential(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn parse() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("[1,")?)
        }
        assert!(matches!(parse(), Err(CoreError::Deserialization(_))));
    }
}
