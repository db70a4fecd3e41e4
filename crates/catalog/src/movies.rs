//! Movies (`/api/filmes`).

use once_cell::sync::Lazy;
use serde_json::Value;

use filmoteca_core::Document;
use filmoteca_core::document::scalar_text;
use filmoteca_validation::check::has_letter_and_digit;
use filmoteca_validation::{FieldRule, RuleSet};

use crate::resource::{Operation, Resource, SearchField};

pub const COLLECTION: &str = "filmes";
pub const TITLE: &str = "title";
pub const YEAR: &str = "year";

pub const NOT_REGISTERED: &str = "Filme não cadastrado";
pub const YEAR_MISMATCH: &str = "O ano informado não confere com o do filme cadastrado";
pub const REGISTERED: &str = "Filme cadastrado com sucesso";

static REGISTRATION_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        FieldRule::required(TITLE, "É obrigatório informar o nome do filme"),
        FieldRule::required(YEAR, "É obrigatório informar o ano"),
    ])
});

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::required(TITLE, "É obrigatório informar o nome do filme")
            .alphanumeric("/. ", "O nome do filme não deve conter caracteres especiais")
            .length(1, 200, "O nome do filme é muito longo. Máximo 200"),
        FieldRule::required(YEAR, "É obrigatório informar o ano")
            .numeric("O ano deve conter números")
            .length(4, 4, "O ano deve conter 4 números"),
        FieldRule::required("imdb_id", "É obrigatório informar o IMDB id do filme")
            .alphanumeric("", "O IMDb deve conter apenas letras e números")
            .custom(
                "letter_and_digit",
                has_letter_and_digit,
                "O IMDb deve conter pelo menos uma letra e um número.",
            )
            .length(7, 7, "O imdb deve conter 7 caracteres"),
        FieldRule::required("rank", "É obrigatório informar o rank do filme")
            .numeric("O rank deve conter apenas números")
            .length(1, 6, "O rank pode conter até 6 caracteres"),
        FieldRule::required("actors", "É obrigatório informar o nome dos atores")
            .length(1, 10_000, "Já há muitos nomes. máximo 10000 caracteres"),
        FieldRule::optional("aka"),
        FieldRule::optional("director"),
    ])
}

pub fn resource() -> Resource {
    Resource {
        path: "filmes",
        collection: COLLECTION,
        rules: rules(),
        sort_by: Some(TITLE),
        search: SearchField {
            segment: "title",
            field: TITLE,
        },
        hidden: &[],
        gated: &[Operation::List, Operation::Update, Operation::Delete],
    }
}

/// Rules for `POST /filme/cadastro`: just the lookup key and the year.
pub fn registration_rules() -> &'static RuleSet {
    &REGISTRATION_RULES
}

/// Whether the year supplied at registration matches the stored movie.
///
/// Both sides are compared through their trimmed text form, so `2010` and
/// `"2010"` match.
pub fn year_matches(movie: &Document, supplied: &Value) -> bool {
    let stored = movie.get(YEAR).and_then(scalar_text);
    let supplied = scalar_text(supplied);
    match (stored, supplied) {
        (Some(stored), Some(supplied)) => {
            let supplied = supplied.trim();
            !supplied.is_empty() && stored.trim() == supplied
        }
        _ => false,
    }
}
