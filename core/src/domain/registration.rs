//! Transaction registration.
//!
//! Validates the raw registration form and, when it passes, turns it into a
//! stored transaction: fresh UUID, current timestamp, parsed amount. The
//! validation messages follow the configured locale.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::info;
use shared::{RegisterForm, RegistrationError, Transaction};

use crate::domain::display::{Currency, DisplayConfig, Locale};
use crate::domain::transaction_service::TransactionService;
use crate::storage::Connection;

/// Service that validates registration forms and stores the results
#[derive(Clone)]
pub struct RegistrationService<C: Connection> {
    transaction_service: TransactionService<C>,
    config: DisplayConfig,
}

impl<C: Connection> RegistrationService<C> {
    /// Create a new registration service
    pub fn new(transaction_service: TransactionService<C>, config: DisplayConfig) -> Self {
        Self {
            transaction_service,
            config,
        }
    }

    /// Validate a form, collecting every problem in presentation order.
    ///
    /// An empty vector means the form can be registered as-is.
    pub fn validate(&self, form: &RegisterForm) -> Vec<RegistrationError> {
        let mut errors = Vec::new();

        if form.name.trim().is_empty() {
            errors.push(RegistrationError::NameRequired);
        }

        let amount = form.amount.trim();
        if amount.is_empty() {
            errors.push(RegistrationError::AmountRequired);
        } else {
            match self.parse_amount(amount) {
                None => errors.push(RegistrationError::AmountNotNumeric),
                Some(value) if value <= 0.0 => {
                    errors.push(RegistrationError::AmountNotPositive)
                }
                Some(_) => {}
            }
        }

        if form.kind.is_none() {
            errors.push(RegistrationError::KindNotSelected);
        }

        if form.category_key.is_none() {
            errors.push(RegistrationError::CategoryNotSelected);
        }

        errors
    }

    /// User-facing message for a validation error
    pub fn error_message(&self, error: &RegistrationError) -> &'static str {
        match self.config.locale {
            Locale::PtBr => match error {
                RegistrationError::NameRequired => "Desculpa, mas o campo nome é obrigatório",
                RegistrationError::AmountRequired => "Desculpa, mas o campo valor é obrigatório",
                RegistrationError::AmountNotNumeric => {
                    "Desculpa, informe um valor númerico no preço"
                }
                RegistrationError::AmountNotPositive => {
                    "Desculpa, mas o valor de preço, não pode ser negativo"
                }
                RegistrationError::KindNotSelected => "Selecione o tipo da transação",
                RegistrationError::CategoryNotSelected => "Selecione a Categoria",
            },
            Locale::EnUs => match error {
                RegistrationError::NameRequired => "Sorry, the name field is required",
                RegistrationError::AmountRequired => "Sorry, the amount field is required",
                RegistrationError::AmountNotNumeric => "Sorry, enter a numeric amount",
                RegistrationError::AmountNotPositive => "Sorry, the amount cannot be negative",
                RegistrationError::KindNotSelected => "Select the transaction type",
                RegistrationError::CategoryNotSelected => "Select a category",
            },
        }
    }

    /// Validate the form and store the resulting transaction.
    ///
    /// The first validation failure aborts with its user-facing message; on
    /// success the created transaction is returned as stored.
    pub async fn register(&self, user_id: &str, form: &RegisterForm) -> Result<Transaction> {
        if let Some(error) = self.validate(form).first() {
            return Err(anyhow!(self.error_message(error)));
        }

        let amount = match self.parse_amount(form.amount.trim()) {
            Some(amount) => amount,
            None => return Err(anyhow!(self.error_message(&RegistrationError::AmountNotNumeric))),
        };
        let kind = match form.kind {
            Some(kind) => kind,
            None => return Err(anyhow!(self.error_message(&RegistrationError::KindNotSelected))),
        };
        let category = match &form.category_key {
            Some(key) => key.clone(),
            None => {
                return Err(anyhow!(
                    self.error_message(&RegistrationError::CategoryNotSelected)
                ))
            }
        };

        let transaction = Transaction {
            id: Transaction::generate_id(),
            name: form.name.clone(),
            amount,
            kind,
            category,
            date: Utc::now(),
        };

        self.transaction_service
            .store_transaction(user_id, &transaction)
            .await
            .context(self.save_failure_message())?;

        info!(
            "Registered transaction '{}' for user '{}'",
            transaction.id, user_id
        );

        Ok(transaction)
    }

    /// Parse the form's amount field, tolerating the configured currency symbol
    fn parse_amount(&self, input: &str) -> Option<f64> {
        let symbol = match self.config.currency {
            Currency::Brl => "R$",
            Currency::Usd => "$",
        };

        let cleaned = input.trim().trim_start_matches(symbol).trim();

        cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    fn save_failure_message(&self) -> &'static str {
        match self.config.locale {
            Locale::PtBr => "Não foi possível salvar",
            Locale::EnUs => "Could not save",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonConnection;
    use shared::TransactionKind;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup_test_service() -> (RegistrationService<JsonConnection>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let connection =
            JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        let transaction_service = TransactionService::new(Arc::new(connection));
        (
            RegistrationService::new(transaction_service, DisplayConfig::default()),
            temp_dir,
        )
    }

    fn valid_form() -> RegisterForm {
        RegisterForm::new(
            "Mercado",
            "89.90",
            Some(TransactionKind::Expense),
            Some("food"),
        )
    }

    #[test]
    fn test_blank_form_collects_every_error() {
        let (service, _temp_dir) = setup_test_service();

        let errors = service.validate(&RegisterForm::default());

        assert_eq!(
            errors,
            vec![
                RegistrationError::NameRequired,
                RegistrationError::AmountRequired,
                RegistrationError::KindNotSelected,
                RegistrationError::CategoryNotSelected,
            ]
        );
    }

    #[test]
    fn test_valid_form_passes() {
        let (service, _temp_dir) = setup_test_service();

        assert!(service.validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_comma_decimal_is_not_numeric() {
        let (service, _temp_dir) = setup_test_service();
        let form = RegisterForm {
            amount: "59,90".to_string(),
            ..valid_form()
        };

        assert_eq!(
            service.validate(&form),
            vec![RegistrationError::AmountNotNumeric]
        );
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let (service, _temp_dir) = setup_test_service();

        for amount in ["0", "-50", "-0.01"] {
            let form = RegisterForm {
                amount: amount.to_string(),
                ..valid_form()
            };
            assert_eq!(
                service.validate(&form),
                vec![RegistrationError::AmountNotPositive],
                "amount {:?} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn test_amount_accepts_currency_symbol_prefix() {
        let (service, _temp_dir) = setup_test_service();
        let form = RegisterForm {
            amount: "R$ 120.50".to_string(),
            ..valid_form()
        };

        assert!(service.validate(&form).is_empty());
    }

    #[test]
    fn test_error_messages_keep_established_wording() {
        let (service, _temp_dir) = setup_test_service();

        assert_eq!(
            service.error_message(&RegistrationError::NameRequired),
            "Desculpa, mas o campo nome é obrigatório"
        );
        assert_eq!(
            service.error_message(&RegistrationError::AmountNotNumeric),
            "Desculpa, informe um valor númerico no preço"
        );
        assert_eq!(
            service.error_message(&RegistrationError::KindNotSelected),
            "Selecione o tipo da transação"
        );
        assert_eq!(
            service.error_message(&RegistrationError::CategoryNotSelected),
            "Selecione a Categoria"
        );
    }

    #[tokio::test]
    async fn test_register_stores_the_transaction() {
        let (service, _temp_dir) = setup_test_service();

        let transaction = service.register("alice", &valid_form()).await.unwrap();

        assert!(!transaction.id.is_empty());
        assert_eq!(transaction.name, "Mercado");
        assert_eq!(transaction.amount, 89.9);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, "food");

        let stored = service
            .transaction_service
            .list_transactions("alice")
            .await
            .unwrap();
        assert_eq!(stored, vec![transaction]);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_form_and_stores_nothing() {
        let (service, _temp_dir) = setup_test_service();
        let form = RegisterForm {
            name: "".to_string(),
            ..valid_form()
        };

        let err = service.register("alice", &form).await.unwrap_err();

        assert_eq!(err.to_string(), "Desculpa, mas o campo nome é obrigatório");
        let stored = service
            .transaction_service
            .list_transactions("alice")
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_register_generates_unique_ids() {
        let (service, _temp_dir) = setup_test_service();

        let first = service.register("alice", &valid_form()).await.unwrap();
        let second = service.register("alice", &valid_form()).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
