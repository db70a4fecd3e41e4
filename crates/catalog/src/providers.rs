//! Service providers (`/api/prestadores`).

use filmoteca_validation::{FieldRule, RuleSet};

use crate::resource::{Resource, SearchField};

pub const COLLECTION: &str = "prestadores";

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::required("cnpj", "É obrigatório informar o CNPJ")
            .numeric("O CNPJ deve conter números")
            .length(14, 14, "O CNPJ deve conter 14 números"),
        FieldRule::required("razao_social", "É obrigatório informar a razão social")
            .alphanumeric("/ .", "A razão social não deve conter caracteres especiais")
            .length(5, 200, "A razão social deve ter entre 5 e 200 caracteres"),
        FieldRule::required("cnae_fiscal", "O código do CNAE deve ser um número")
            .numeric("O código do CNAE deve ser um número"),
        FieldRule::optional("nome_fantasia"),
    ])
}

pub fn resource() -> Resource {
    Resource {
        path: "prestadores",
        collection: COLLECTION,
        rules: rules(),
        sort_by: Some("razao_social"),
        search: SearchField {
            segment: "razao",
            field: "razao_social",
        },
        hidden: &[],
        gated: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn doc(value: Value) -> filmoteca_core::Document {
        filmoteca_core::document::from_value(value).unwrap()
    }

    #[test]
    fn valid_provider_passes() {
        let body = json!({
            "cnpj": "12345678000199",
            "razao_social": "Oficina Sao Jose Ltda.",
            "cnae_fiscal": 4520001,
        });
        assert!(rules().validate(&doc(body)).is_ok());
    }

    #[test]
    fn short_razao_social_and_bad_cnpj_are_both_reported() {
        let body = json!({
            "cnpj": "123",
            "razao_social": "Abc",
            "cnae_fiscal": "x",
        });
        let err = rules().validate(&doc(body)).unwrap_err();
        assert_eq!(err.fields(), vec!["cnpj", "razao_social", "cnae_fiscal"]);
    }

    #[test]
    fn missing_cnae_is_an_error() {
        let body = json!({"cnpj": "12345678000199", "razao_social": "Oficina Ltda"});
        let err = rules().validate(&doc(body)).unwrap_err();
        assert_eq!(err.fields(), vec!["cnae_fiscal"]);
    }

    proptest! {
        /// Property: only 14-digit CNPJs are accepted.
        #[test]
        fn cnpj_must_have_fourteen_digits(cnpj in "[0-9]{1,20}") {
            let body = json!({
                "cnpj": cnpj.clone(),
                "razao_social": "Oficina Ltda",
                "cnae_fiscal": "4520001",
            });
            let ok = rules().validate(&doc(body)).is_ok();
            prop_assert_eq!(ok, cnpj.len() == 14);
        }
    }
}
