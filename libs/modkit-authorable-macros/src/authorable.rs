use proc_macro_error2::abort;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta, MetaNameValue, Token,
    spanned::Spanned,
};

const VALID_KEYS: &str = "users_model, guard, set_author_when_creating, \
                          set_author_when_updating, created_by_column_name, updated_by_column_name";

/// Settings parsed from `#[authorable(...)]` attributes
#[derive(Default)]
struct AuthorableAttrs {
    users_model: Option<String>,
    guard: Option<String>,
    set_author_when_creating: Option<bool>,
    set_author_when_updating: Option<bool>,
    created_by_column_name: Option<(String, Span)>,
    updated_by_column_name: Option<(String, Span)>,
}

#[allow(clippy::needless_pass_by_value)] // DeriveInput is consumed by proc-macro pattern
pub fn expand_derive_authorable(input: DeriveInput) -> TokenStream {
    let Data::Struct(data) = &input.data else {
        abort!(
            input.ident.span(),
            "#[derive(Authorable)] can only be applied to structs"
        );
    };

    let attrs = parse_authorable_attrs(&input);

    let fields = field_names(&data.fields);
    for (column, span) in [&attrs.created_by_column_name, &attrs.updated_by_column_name]
        .into_iter()
        .flatten()
    {
        if !fields.iter().any(|f| f == column) {
            abort!(
                *span,
                "authorable: `{}` is not a field or column of `{}`",
                column,
                input.ident
            );
        }
    }

    let users_model = attrs.users_model.map(|v| quote! { .users_model(#v) });
    let guard = attrs.guard.map(|v| quote! { .guard(#v) });
    let creating = attrs
        .set_author_when_creating
        .map(|v| quote! { .set_author_when_creating(#v) });
    let updating = attrs
        .set_author_when_updating
        .map(|v| quote! { .set_author_when_updating(#v) });
    let created_by = attrs
        .created_by_column_name
        .map(|(v, _)| quote! { .created_by_column_name(#v) });
    let updated_by = attrs
        .updated_by_column_name
        .map(|(v, _)| quote! { .updated_by_column_name(#v) });

    let entity_ident = syn::Ident::new("Entity", input.ident.span());

    quote! {
        impl ::modkit_authorable::AuthorableEntity for #entity_ident {
            fn authorable() -> ::modkit_authorable::AuthorableOverrides {
                ::modkit_authorable::AuthorableOverrides::new()
                    #users_model
                    #guard
                    #creating
                    #updating
                    #created_by
                    #updated_by
            }
        }
    }
}

/// Names a column can be referred to by: each field identifier (without the
/// raw-identifier prefix) and its `#[sea_orm(column_name = "...")]`, if any
fn field_names(fields: &Fields) -> Vec<String> {
    let mut names = Vec::new();
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        names.push(ident.unraw().to_string());
        names.extend(field.attrs.iter().filter_map(sea_orm_column_name));
    }
    names
}

/// `column_name` of a `#[sea_orm(...)]` field attribute
fn sea_orm_column_name(attr: &Attribute) -> Option<String> {
    if !attr.path().is_ident("sea_orm") {
        return None;
    }
    let metas = attr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()?;
    metas.into_iter().find_map(|meta| match meta {
        Meta::NameValue(MetaNameValue {
            path,
            value:
                Expr::Lit(ExprLit {
                    lit: Lit::Str(name),
                    ..
                }),
            ..
        }) if path.is_ident("column_name") => Some(name.value()),
        _ => None,
    })
}

/// Parse all `#[authorable(...)]` attributes with duplicate detection
fn parse_authorable_attrs(input: &DeriveInput) -> AuthorableAttrs {
    let mut attrs = AuthorableAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("authorable") {
            continue;
        }

        let result = attr.parse_nested_meta(|meta| {
            let span = meta.path.span();
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            if key.is_empty() {
                abort!(span, "Expected attribute name");
            }

            let lit: Lit = meta.value()?.parse()?;

            match key.as_str() {
                "users_model" => {
                    check_unset(attrs.users_model.is_some(), &key, span);
                    attrs.users_model = Some(string_value(&lit, &key));
                }
                "guard" => {
                    check_unset(attrs.guard.is_some(), &key, span);
                    attrs.guard = Some(string_value(&lit, &key));
                }
                "set_author_when_creating" => {
                    check_unset(attrs.set_author_when_creating.is_some(), &key, span);
                    attrs.set_author_when_creating = Some(bool_value(&lit, &key));
                }
                "set_author_when_updating" => {
                    check_unset(attrs.set_author_when_updating.is_some(), &key, span);
                    attrs.set_author_when_updating = Some(bool_value(&lit, &key));
                }
                "created_by_column_name" => {
                    check_unset(attrs.created_by_column_name.is_some(), &key, span);
                    attrs.created_by_column_name = Some((string_value(&lit, &key), lit.span()));
                }
                "updated_by_column_name" => {
                    check_unset(attrs.updated_by_column_name.is_some(), &key, span);
                    attrs.updated_by_column_name = Some((string_value(&lit, &key), lit.span()));
                }
                _ => {
                    abort!(
                        span,
                        "Unknown attribute '{}'. Valid attributes: {}",
                        key,
                        VALID_KEYS
                    );
                }
            }

            Ok(())
        });

        if let Err(err) = result {
            abort!(err.span(), "{}", err);
        }
    }

    attrs
}

fn check_unset(already_set: bool, key: &str, span: Span) {
    if already_set {
        abort!(span, "duplicate attribute '{}'", key);
    }
}

fn string_value(lit: &Lit, key: &str) -> String {
    let Lit::Str(s) = lit else {
        abort!(lit.span(), "authorable: `{}` expects a string literal", key);
    };
    let value = s.value();
    if value.is_empty() {
        abort!(lit.span(), "authorable: `{}` must not be empty", key);
    }
    value
}

fn bool_value(lit: &Lit, key: &str) -> bool {
    let Lit::Bool(b) = lit else {
        abort!(lit.span(), "authorable: `{}` expects `true` or `false`", key);
    };
    b.value
}
