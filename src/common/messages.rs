// src/common/messages.rs
//
// Catálogo de mensagens de erro em português (padrão) e inglês.

use crate::common::error::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Pt,
    En,
}

impl Lang {
    /// "pt", "pt-BR", "en-US"... Qualquer coisa desconhecida cai no padrão.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split('-').next().unwrap_or(tag);
        if primary.eq_ignore_ascii_case("en") {
            Lang::En
        } else {
            Lang::Pt
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Lang::Pt => "pt",
            Lang::En => "en",
        }
    }
}

impl Resource {
    pub fn not_found(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Resource::Role, Lang::Pt) => "Cargo não encontrado.",
            (Resource::Role, Lang::En) => "Role not found.",
            (Resource::Category, Lang::Pt) => "Categoria não encontrada.",
            (Resource::Category, Lang::En) => "Category not found.",
            (Resource::User, Lang::Pt) => "Usuário não encontrado.",
            (Resource::User, Lang::En) => "User not found.",
            (Resource::Customer, Lang::Pt) => "Cliente não encontrado.",
            (Resource::Customer, Lang::En) => "Customer not found.",
            (Resource::Employee, Lang::Pt) => "Funcionário não encontrado.",
            (Resource::Employee, Lang::En) => "Employee not found.",
            (Resource::Product, Lang::Pt) => "Produto não encontrado.",
            (Resource::Product, Lang::En) => "Product not found.",
            (Resource::ProductImage, Lang::Pt) => "Imagem não encontrada.",
            (Resource::ProductImage, Lang::En) => "Image not found.",
            (Resource::PaymentMethod, Lang::Pt) => "Forma de pagamento não encontrada.",
            (Resource::PaymentMethod, Lang::En) => "Payment method not found.",
            (Resource::Order, Lang::Pt) => "Pedido não encontrado.",
            (Resource::Order, Lang::En) => "Order not found.",
            (Resource::OrderItem, Lang::Pt) => "Item não encontrado.",
            (Resource::OrderItem, Lang::En) => "Order item not found.",
            (Resource::Payment, Lang::Pt) => "Pagamento não encontrado.",
            (Resource::Payment, Lang::En) => "Payment not found.",
        }
    }

    pub fn conflict(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Resource::Role, Lang::Pt) => "Código de cargo já existe.",
            (Resource::Role, Lang::En) => "Role code already exists.",
            (Resource::Category, Lang::Pt) => "Já existe uma categoria com esse nome.",
            (Resource::Category, Lang::En) => "A category with this name already exists.",
            (Resource::User | Resource::Customer, Lang::Pt) => "Email já cadastrado.",
            (Resource::User | Resource::Customer, Lang::En) => "Email already registered.",
            (Resource::Employee, Lang::Pt) => "Usuário já vinculado a outro funcionário.",
            (Resource::Employee, Lang::En) => "User already linked to another employee.",
            (Resource::PaymentMethod, Lang::Pt) => "Forma de pagamento já cadastrada.",
            (Resource::PaymentMethod, Lang::En) => "Payment method already registered.",
            (Resource::OrderItem, Lang::Pt) => "O produto já faz parte deste pedido.",
            (Resource::OrderItem, Lang::En) => "The product is already part of this order.",
            (_, Lang::Pt) => "Registro duplicado.",
            (_, Lang::En) => "Duplicate record.",
        }
    }

    pub fn has_dependents(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Resource::Category, Lang::Pt) => {
                "Não é possível deletar a categoria porque ela está vinculada a produtos."
            }
            (Resource::Category, Lang::En) => {
                "The category cannot be deleted because products are linked to it."
            }
            (Resource::Product, Lang::Pt) => {
                "Não é possível deletar o produto porque ele faz parte de pedidos."
            }
            (Resource::Product, Lang::En) => {
                "The product cannot be deleted because it is part of orders."
            }
            (Resource::PaymentMethod, Lang::Pt) => {
                "Não é possível deletar a forma de pagamento porque existem pagamentos vinculados."
            }
            (Resource::PaymentMethod, Lang::En) => {
                "The payment method cannot be deleted because payments reference it."
            }
            (_, Lang::Pt) => "Não é possível deletar: existem registros vinculados.",
            (_, Lang::En) => "Cannot delete: linked records exist.",
        }
    }
}

pub fn validation(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "Um ou mais campos são inválidos.",
        Lang::En => "One or more fields are invalid.",
    }
}

pub fn invalid_input(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "Dados inválidos.",
        Lang::En => "Invalid input.",
    }
}

pub fn invalid_id(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "ID deve ser um número válido.",
        Lang::En => "ID must be a valid number.",
    }
}

pub fn invalid_reference(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "Um dos registros referenciados não existe.",
        Lang::En => "A referenced record does not exist.",
    }
}

pub fn internal(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "Ocorreu um erro inesperado.",
        Lang::En => "An unexpected error occurred.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pt-BR", Lang::Pt)]
    #[case("en", Lang::En)]
    #[case("EN-us", Lang::En)]
    #[case("fr", Lang::Pt)]
    fn picks_language_from_primary_subtag(#[case] tag: &str, #[case] expected: Lang) {
        assert_eq!(Lang::from_tag(tag), expected);
    }
}
