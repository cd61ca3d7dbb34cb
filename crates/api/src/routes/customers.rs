//! Customer read and update handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use dvdrental_core::{CustomerId, StoreId};

use super::form::{FormRequest, ValidForm, max_len, optional, parse_required, required};
use crate::db::{CustomerRepository, RepositoryError, customers::CustomerFilter};
use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerUpdate};
use crate::state::AppState;

/// Query string for `GET /customers`.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub store_id: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<CustomerQuery> for CustomerFilter {
    type Error = AppError;

    fn try_from(query: CustomerQuery) -> std::result::Result<Self, Self::Error> {
        let store_id = optional(query.store_id)
            .map(|raw| {
                raw.parse::<StoreId>().map_err(|e| AppError::InvalidField {
                    field: "store_id",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            store_id,
            country: optional(query.country),
        })
    }
}

/// Width of `customer.first_name` and `customer.last_name`.
const NAME_MAX: usize = 45;
/// Width of `customer.email`.
const EMAIL_MAX: usize = 50;

/// Form body for `PUT /customers`.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerForm {
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub create_date: Option<String>,
}

impl FormRequest for CustomerUpdate {
    type Raw = CustomerForm;
}

impl TryFrom<CustomerForm> for CustomerUpdate {
    type Error = AppError;

    fn try_from(form: CustomerForm) -> std::result::Result<Self, Self::Error> {
        let customer_id: CustomerId = parse_required(form.customer_id, "customer_id")?;
        let first_name = trimmed(form.first_name, "first_name", NAME_MAX)?;
        let last_name = trimmed(form.last_name, "last_name", NAME_MAX)?;
        let email = trimmed(form.email, "email", EMAIL_MAX)?;
        let create_date: NaiveDate = parse_required(form.create_date, "create_date")?;

        Ok(Self {
            customer_id,
            first_name,
            last_name,
            email,
            create_date,
        })
    }
}

fn trimmed(value: Option<String>, field: &'static str, max: usize) -> Result<String> {
    max_len(required(value, field)?.trim().to_owned(), field, max)
}

/// `GET /customers`
///
/// One object per customer whose address resolves through city to country.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<Customer>>> {
    let filter = CustomerFilter::try_from(query)?;
    let customers = CustomerRepository::new(state.pool())
        .list_with_location(&filter)
        .await?;
    Ok(Json(customers))
}

/// `PUT /customers`
///
/// Returns the customer as stored after the update.
pub async fn update(
    State(state): State<AppState>,
    ValidForm(update): ValidForm<CustomerUpdate>,
) -> Result<Json<Customer>> {
    let customer = CustomerRepository::new(state.pool())
        .update(&update)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!(
                "Customer with id = {} does not exist",
                update.customer_id
            )),
            other => AppError::Database(other),
        })?;

    tracing::info!(customer_id = %customer.customer_id, "customer updated");

    Ok(Json(customer))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_form() -> CustomerForm {
        CustomerForm {
            customer_id: Some("1".into()),
            first_name: Some("Mary".into()),
            last_name: Some("Smith".into()),
            email: Some("mary.smith@sakilacustomer.org".into()),
            create_date: Some("2006-02-14".into()),
        }
    }

    #[test]
    fn test_update_form_parses() {
        let update = CustomerUpdate::try_from(full_form()).unwrap();
        assert_eq!(update.customer_id, CustomerId::new(1));
        assert_eq!(update.first_name, "Mary");
        assert_eq!(
            update.create_date,
            NaiveDate::from_ymd_opt(2006, 2, 14).unwrap()
        );
    }

    #[test]
    fn test_update_form_names_missing_field() {
        let cases: [(fn(&mut CustomerForm), &str); 5] = [
            (|f| f.customer_id = None, "customer_id"),
            (|f| f.first_name = None, "first_name"),
            (|f| f.last_name = Some("  ".into()), "last_name"),
            (|f| f.email = None, "email"),
            (|f| f.create_date = Some(String::new()), "create_date"),
        ];

        for (blank_out, expected) in cases {
            let mut form = full_form();
            blank_out(&mut form);
            match CustomerUpdate::try_from(form) {
                Err(AppError::MissingField(field)) => assert_eq!(field, expected),
                other => panic!("expected missing {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_update_form_rejects_malformed_values() {
        let mut form = full_form();
        form.customer_id = Some("abc".into());
        assert!(matches!(
            CustomerUpdate::try_from(form),
            Err(AppError::InvalidField {
                field: "customer_id",
                ..
            })
        ));

        let mut form = full_form();
        form.create_date = Some("14/02/2006".into());
        assert!(matches!(
            CustomerUpdate::try_from(form),
            Err(AppError::InvalidField {
                field: "create_date",
                ..
            })
        ));
    }

    #[test]
    fn test_update_form_rejects_values_wider_than_columns() {
        let mut form = full_form();
        form.first_name = Some("x".repeat(60));
        assert!(matches!(
            CustomerUpdate::try_from(form),
            Err(AppError::InvalidField {
                field: "first_name",
                ..
            })
        ));

        let mut form = full_form();
        form.last_name = Some("y".repeat(46));
        assert!(matches!(
            CustomerUpdate::try_from(form),
            Err(AppError::InvalidField {
                field: "last_name",
                ..
            })
        ));

        let mut form = full_form();
        form.email = Some(format!("{}@example.org", "z".repeat(40)));
        assert!(matches!(
            CustomerUpdate::try_from(form),
            Err(AppError::InvalidField { field: "email", .. })
        ));

        // Surrounding whitespace does not count against the limit.
        let mut form = full_form();
        form.first_name = Some(format!("  {}  ", "x".repeat(45)));
        assert_eq!(
            CustomerUpdate::try_from(form).unwrap().first_name,
            "x".repeat(45)
        );
    }

    #[test]
    fn test_query_filter() {
        let filter = CustomerFilter::try_from(CustomerQuery::default()).unwrap();
        assert_eq!(filter, CustomerFilter::default());

        let filter = CustomerFilter::try_from(CustomerQuery {
            store_id: Some("2".into()),
            country: Some(" Canada ".into()),
        })
        .unwrap();
        assert_eq!(filter.store_id, Some(StoreId::new(2)));
        assert_eq!(filter.country.as_deref(), Some("Canada"));

        assert!(
            CustomerFilter::try_from(CustomerQuery {
                store_id: Some("two".into()),
                country: None,
            })
            .is_err()
        );
    }

    #[test]
    fn test_customer_json_shape() {
        let customer = Customer {
            customer_id: CustomerId::new(1),
            store_id: StoreId::new(1),
            first_name: "Mary".into(),
            last_name: "Smith".into(),
            email: None,
            address_id: dvdrental_core::AddressId::new(5),
            activebool: true,
            create_date: NaiveDate::from_ymd_opt(2006, 2, 14).unwrap(),
            active: Some(1),
        };
        let value = serde_json::to_value(&customer).unwrap();

        assert_eq!(value["create_date"], "2006-02-14");
        assert_eq!(value["address_id"], 5);
        assert_eq!(value["activebool"], true);
        assert!(value["email"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 9);
    }
}
