// ═══════════════════════════════════════════════════════════════════
// Model Tests — Transaction, Account, Profile, Preferences, Mirror
// records, Settings
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};

use finatrack_core::errors::CoreError;
use finatrack_core::models::account::{
    local_part, normalize_email, Account, Avatar, Profile, ProfileUpdate,
};
use finatrack_core::models::chart::{MonthMatching, MONTH_LABELS, SERIES_MONTHS};
use finatrack_core::models::mirror::{
    MirrorTable, OrderRecord, PremiumPlan, ProfileRecord, TransactionRecord, ORDER_STATUS_PENDING,
};
use finatrack_core::models::preferences::{ActiveView, Language, Theme};
use finatrack_core::models::settings::AppConfig;
use finatrack_core::models::transaction::{
    parse_amount, Category, Transaction, TransactionDraft, TransactionFilter, TransactionId,
    TransactionType,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn account(email: &str, name: &str) -> Account {
    Account {
        email: email.to_string(),
        name: name.to_string(),
        credential: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        avatar: None,
        phone: Some("+2348000000000".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        is_new_user: true,
    }
}

// ═══════════════════════════════════════════════════════════════════
// TransactionType / Category
// ═══════════════════════════════════════════════════════════════════

mod transaction_type {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"expense\""
        );
        let parsed: TransactionType = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(parsed, TransactionType::Income);
    }
}

mod category {
    use super::*;

    #[test]
    fn income_type_only_offers_income() {
        assert_eq!(
            Category::for_type(TransactionType::Income),
            vec![Category::Income]
        );
    }

    #[test]
    fn expense_type_offers_everything_but_income() {
        let cats = Category::for_type(TransactionType::Expense);
        assert_eq!(cats.len(), 5);
        assert!(!cats.contains(&Category::Income));
        assert_eq!(cats[0], Category::Food);
    }

    #[test]
    fn defaults_per_type() {
        assert_eq!(
            Category::default_for(TransactionType::Income),
            Category::Income
        );
        assert_eq!(
            Category::default_for(TransactionType::Expense),
            Category::Food
        );
    }

    #[test]
    fn serializes_as_capitalized_name() {
        assert_eq!(
            serde_json::to_string(&Category::Entertainment).unwrap(),
            "\"Entertainment\""
        );
        assert_eq!(Category::Transport.to_string(), "Transport");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction / TransactionDraft
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = TransactionId::generate();
        let b = TransactionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn draft_new_prefills_form() {
        let draft = TransactionDraft::new(TransactionType::Income, d(2024, 3, 1));
        assert_eq!(draft.date, d(2024, 3, 1));
        assert_eq!(draft.category, Category::Income);
        assert!(draft.description.is_empty());
        assert_eq!(draft.amount, 0.0);
    }

    #[test]
    fn with_id_keeps_draft_fields() {
        let draft = TransactionDraft::new(TransactionType::Expense, d(2024, 3, 5))
            .with_description("Groceries")
            .with_amount(120.0);
        let tx = Transaction::with_id(TransactionId::from("t1"), draft);
        assert_eq!(tx.id.as_str(), "t1");
        assert_eq!(tx.description, "Groceries");
        assert_eq!(tx.amount, 120.0);
        assert!(tx.is_expense());
        assert!(!tx.is_income());
    }

    #[test]
    fn json_uses_type_field() {
        let tx = Transaction::with_id(
            TransactionId::from("abc"),
            TransactionDraft::new(TransactionType::Income, d(2024, 3, 1))
                .with_description("Paycheck")
                .with_amount(5000.0),
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["category"], "Income");
    }

    #[test]
    fn legacy_numeric_looking_ids_load() {
        let raw = r#"{"id":"1709280000000","date":"2024-03-01","description":"Rent","amount":800,"category":"Rent","type":"expense"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id.as_str(), "1709280000000");
        assert_eq!(tx.amount, 800.0);
    }
}

mod draft_validation {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft::new(TransactionType::Expense, d(2024, 3, 5))
            .with_description("Bus")
            .with_amount(2.5)
            .with_category(Category::Transport)
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_description_rejected() {
        let err = draft().with_description("   ").validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn zero_negative_and_nan_rejected() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = draft().with_amount(amount).validate().unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{amount}");
        }
    }

    #[test]
    fn parse_amount_accepts_decimal_text() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), 12.5);
        assert_eq!(parse_amount("5000").unwrap(), 5000.0);
    }

    #[test]
    fn parse_amount_rejects_garbage_and_non_positive() {
        assert!(matches!(parse_amount("abc"), Err(CoreError::ValidationError(_))));
        assert!(matches!(parse_amount(""), Err(CoreError::ValidationError(_))));
        assert!(matches!(parse_amount("-3"), Err(CoreError::ValidationError(_))));
        assert!(matches!(parse_amount("0"), Err(CoreError::ValidationError(_))));
    }
}

mod transaction_filter {
    use super::*;

    #[test]
    fn matches_by_type() {
        let income = Transaction::from_draft(
            TransactionDraft::new(TransactionType::Income, d(2024, 1, 1))
                .with_description("Pay")
                .with_amount(1.0),
        );
        let expense = Transaction::from_draft(
            TransactionDraft::new(TransactionType::Expense, d(2024, 1, 1))
                .with_description("Tea")
                .with_amount(1.0),
        );
        assert!(TransactionFilter::All.matches(&income));
        assert!(TransactionFilter::All.matches(&expense));
        assert!(TransactionFilter::Income.matches(&income));
        assert!(!TransactionFilter::Income.matches(&expense));
        assert!(TransactionFilter::Expenses.matches(&expense));
        assert!(!TransactionFilter::Expenses.matches(&income));
        assert_eq!(TransactionFilter::default(), TransactionFilter::All);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Account / Avatar / Profile
// ═══════════════════════════════════════════════════════════════════

mod account_model {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  A@B.com "), "a@b.com");
        assert_eq!(normalize_email("Alice@X.COM"), "alice@x.com");
    }

    #[test]
    fn local_part_before_at() {
        assert_eq!(local_part("alice@x.com"), "alice");
        assert_eq!(local_part("noatsign"), "noatsign");
    }

    #[test]
    fn avatar_variant_from_prefix() {
        let inline = Avatar::from("data:image/png;base64,AAAA".to_string());
        let url = Avatar::from("https://cdn.example.com/a.png".to_string());
        assert!(inline.is_inline());
        assert!(!url.is_inline());
        assert_eq!(url.as_str(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn account_json_is_camel_case() {
        let json = serde_json::to_value(account("alice@x.com", "Alice")).unwrap();
        assert_eq!(json["isNewUser"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn account_without_optional_fields_loads() {
        let raw = r#"{"email":"a@b.com","name":"A","credential":"x","createdAt":"2024-01-01T00:00:00Z"}"#;
        let acc: Account = serde_json::from_str(raw).unwrap();
        assert!(acc.avatar.is_none());
        assert!(acc.phone.is_none());
        assert!(!acc.is_new_user);
    }

    #[test]
    fn debug_redacts_credential() {
        let dbg = format!("{:?}", account("alice@x.com", "Alice"));
        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("argon2"));
    }

    #[test]
    fn profile_update_constructors() {
        assert!(ProfileUpdate::default().is_empty());
        assert_eq!(ProfileUpdate::name("Bo").name.as_deref(), Some("Bo"));
        assert!(ProfileUpdate::avatar(Avatar::Url("u".into())).avatar.is_some());
    }
}

mod profile {
    use super::*;

    #[test]
    fn from_account_copies_first_login_flag() {
        let p = Profile::from_account(&account("alice@x.com", "Alice Smith"));
        assert!(p.is_first_login);
        assert!(!p.synthesized);
        assert_eq!(p.first_name(), "Alice");
    }

    #[test]
    fn synthesized_uses_local_part() {
        let p = Profile::synthesized("carol@y.org");
        assert_eq!(p.name, "carol");
        assert!(p.synthesized);
        assert!(!p.is_first_login);
    }

    #[test]
    fn generated_avatar_when_missing() {
        let p = Profile::from_account(&account("alice@x.com", "Alice Smith"));
        let url = p.avatar_url();
        assert!(url.starts_with("https://ui-avatars.com/api/?"));
        assert!(url.contains("name=Alice+Smith"));
        assert!(url.contains("background=4F46E5"));
        assert!(url.contains("bold=true"));
    }

    #[test]
    fn stored_avatar_wins() {
        let mut acc = account("alice@x.com", "Alice");
        acc.avatar = Some(Avatar::Url("https://cdn.example.com/me.png".into()));
        assert_eq!(
            Profile::from_account(&acc).avatar_url(),
            "https://cdn.example.com/me.png"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Preferences
// ═══════════════════════════════════════════════════════════════════

mod preferences {
    use super::*;

    #[test]
    fn theme_parse_and_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::from_code("yo"), Some(Language::Yoruba));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::Igbo.code(), "ig");
        let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["en", "fr", "ar", "ig", "yo"]);
    }

    #[test]
    fn only_arabic_is_rtl() {
        for lang in Language::ALL {
            assert_eq!(lang.is_right_to_left(), lang == Language::Arabic);
        }
    }

    #[test]
    fn dashboard_is_default_view() {
        assert_eq!(ActiveView::default(), ActiveView::Dashboard);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chart constants
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn six_month_window() {
        assert_eq!(SERIES_MONTHS, 6);
        assert_eq!(MONTH_LABELS[0], "Jan");
        assert_eq!(MONTH_LABELS[11], "Dec");
    }

    #[test]
    fn month_matching_serde() {
        assert_eq!(MonthMatching::default(), MonthMatching::CalendarMonth);
        let parsed: MonthMatching = serde_json::from_str("\"year_qualified\"").unwrap();
        assert_eq!(parsed, MonthMatching::YearQualified);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mirror records
// ═══════════════════════════════════════════════════════════════════

mod mirror_records {
    use super::*;

    #[test]
    fn table_names() {
        assert_eq!(MirrorTable::Profiles.as_str(), "profiles");
        assert_eq!(MirrorTable::Transactions.to_string(), "transactions");
        assert_eq!(MirrorTable::Orders.as_str(), "orders");
    }

    #[test]
    fn profile_record_carries_hash() {
        let acc = account("alice@x.com", "Alice");
        let record = ProfileRecord::from(&acc);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["email"], "alice@x.com");
        assert_eq!(json["full_name"], "Alice");
        assert_eq!(json["phone_number"], "+2348000000000");
        assert_eq!(json["password_hash"], acc.credential.as_str());
    }

    #[test]
    fn transaction_record_is_flattened() {
        let tx = Transaction::from_draft(
            TransactionDraft::new(TransactionType::Expense, d(2024, 3, 5))
                .with_description("Groceries")
                .with_amount(120.0),
        );
        let json = serde_json::to_value(TransactionRecord::new("alice@x.com", &tx)).unwrap();
        assert_eq!(json["user_email"], "alice@x.com");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Food");
        assert_eq!(json["date"], "2024-03-05");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn plans_and_prices() {
        assert_eq!(PremiumPlan::Monthly.price(), "$4.99");
        assert_eq!(PremiumPlan::Yearly.price(), "$35.88");
        assert_eq!(PremiumPlan::Support.price(), "Contact");
    }

    #[test]
    fn pending_order() {
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let order = OrderRecord::pending("alice@x.com", PremiumPlan::Yearly, at);
        assert_eq!(order.plan_type, "Yearly");
        assert_eq!(order.amount, "$35.88");
        assert_eq!(order.status, ORDER_STATUS_PENDING);
        assert_eq!(order.status, "pending_manual_activation");
        assert_eq!(order.created_at, at);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults_are_offline_and_valid() {
        let cfg = AppConfig::default();
        assert!(!cfg.mirror.enabled);
        assert_eq!(cfg.mirror.timeout_secs, 30);
        assert_eq!(cfg.dashboard.recent_activity, 3);
        assert_eq!(cfg.dashboard.month_matching, MonthMatching::CalendarMonth);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn enabled_mirror_needs_base_url() {
        let mut cfg = AppConfig::default();
        cfg.mirror.enabled = true;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
        cfg.mirror.base_url = "https://project.supabase.co".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut cfg = AppConfig::default();
        cfg.mirror.timeout_secs = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"dashboard":{"month_matching":"year_qualified"}}"#).unwrap();
        assert_eq!(cfg.dashboard.month_matching, MonthMatching::YearQualified);
        assert_eq!(cfg.dashboard.recent_activity, 3);
        assert!(!cfg.mirror.enabled);
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut cfg = AppConfig::default();
        cfg.mirror.api_key = "super-secret-key".into();
        let dbg = format!("{:?}", cfg.mirror);
        assert!(!dbg.contains("super-secret-key"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finatrack.toml");
        std::fs::write(
            &path,
            "[mirror]\nenabled = true\nbase_url = \"https://example.test\"\napi_key = \"k\"\n\n[dashboard]\nrecent_activity = 5\n",
        )
        .unwrap();
        let cfg = AppConfig::load(path.to_str()).unwrap();
        assert!(cfg.mirror.enabled);
        assert_eq!(cfg.mirror.base_url, "https://example.test");
        assert_eq!(cfg.dashboard.recent_activity, 5);
        assert_eq!(cfg.credentials.time_cost, 2);
    }

    #[test]
    fn load_without_file_is_default() {
        let cfg = AppConfig::load(None).unwrap();
        assert_eq!(cfg.dashboard.recent_activity, 3);
    }
}
