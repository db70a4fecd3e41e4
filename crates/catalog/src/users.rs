//! Users (`/api/usuarios`).
//!
//! Passwords are accepted on writes but never returned by reads.

use filmoteca_validation::check::looks_like_email;
use filmoteca_validation::{Check, FieldRule, RuleSet};

use crate::resource::{Resource, SearchField};

pub const COLLECTION: &str = "usuarios";
pub const PASSWORD: &str = "senha";

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::required("nome", "É obrigatório informar o nome")
            .check(Check::max_length(100), "O nome deve ter no máximo 100 caracteres"),
        FieldRule::required("email", "É obrigatório informar o email")
            .custom("email", looks_like_email, "Informe um email válido"),
        FieldRule::required(PASSWORD, "É obrigatório informar a senha")
            .check(Check::min_length(6), "A senha deve ter pelo menos 6 caracteres"),
        FieldRule::required("idade", "É obrigatório informar a idade")
            .numeric("A idade deve ser um número")
            .length(1, 3, "A idade deve ter no máximo 3 dígitos"),
        FieldRule::optional("genero"),
        FieldRule::optional("ativo"),
        FieldRule::optional("tipo"),
    ])
}

pub fn resource() -> Resource {
    Resource {
        path: "usuarios",
        collection: COLLECTION,
        rules: rules(),
        sort_by: Some("nome"),
        search: SearchField {
            segment: "nome",
            field: "nome",
        },
        hidden: &[PASSWORD],
        gated: &[],
    }
}
