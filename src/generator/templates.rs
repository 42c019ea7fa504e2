use askama::Template;

use crate::error::{GeneratorError, GeneratorResult};
use crate::relations::{Relationship, SlugField};

/// Relation accessor as the model template sees it
#[derive(Debug, Clone)]
pub struct RelationView {
    pub accessor: String,
    /// Eloquent method (`belongsTo`, `hasMany`, `belongsToMany`)
    pub method: &'static str,
    pub related_model: String,
    /// Foreign key column, or pivot table for belongs-to-many
    pub key: String,
}

impl From<&Relationship> for RelationView {
    fn from(relation: &Relationship) -> Self {
        Self {
            accessor: relation.accessor.clone(),
            method: relation.kind.method(),
            related_model: relation.related_model.clone(),
            key: relation.key.clone(),
        }
    }
}

/// One factory field and its faker expression
#[derive(Debug, Clone)]
pub struct FactoryField {
    pub column: String,
    pub faker: String,
}

/// One `rules()`/`attributes()` entry of a form request
#[derive(Debug, Clone)]
pub struct RequestRule {
    pub column: String,
    /// Pipe-joined rule list (`sometimes|required|string|max:255`)
    pub rules: String,
    pub attribute: String,
}

/// Template data for an Eloquent model
#[derive(Template)]
#[template(path = "model.php.txt", escape = "none")]
pub struct ModelTemplateData {
    pub namespace: String,
    pub model: String,
    pub table: String,
    pub label: String,
    pub plural_label: String,
    /// Whether the model uses `HasFactory`
    pub uses_factory: bool,
    /// PHP array literal of fillable columns
    pub fillable_literal: String,
    /// PHP array literal of `column => cast` pairs
    pub casts_literal: String,
    pub slugs: Vec<SlugField>,
    pub relations: Vec<RelationView>,
}

/// Abstract base model carrying the filter scope
#[derive(Template)]
#[template(path = "base_model.php.txt", escape = "none")]
pub struct BaseModelTemplateData {
    pub namespace: String,
}

#[derive(Template)]
#[template(path = "factory.php.txt", escape = "none")]
pub struct FactoryTemplateData {
    pub model: String,
    pub model_fqcn: String,
    pub fields: Vec<FactoryField>,
}

#[derive(Template)]
#[template(path = "repository_interface.php.txt", escape = "none")]
pub struct RepositoryInterfaceTemplateData {
    pub namespace: String,
    pub support_namespace: String,
    pub name: String,
}

/// CRUD repository bound to a model
#[derive(Template)]
#[template(path = "repository.php.txt", escape = "none")]
pub struct RepositoryTemplateData {
    pub namespace: String,
    pub support_namespace: String,
    pub name: String,
    pub model: String,
    pub model_fqcn: String,
    /// PHP array literal of the columns `search` expands to
    pub searchable_literal: String,
}

#[derive(Template)]
#[template(path = "repository_interface_empty.php.txt", escape = "none")]
pub struct EmptyRepositoryInterfaceTemplateData {
    pub namespace: String,
    pub name: String,
}

#[derive(Template)]
#[template(path = "repository_empty.php.txt", escape = "none")]
pub struct EmptyRepositoryTemplateData {
    pub namespace: String,
    pub name: String,
}

#[derive(Template)]
#[template(path = "filter.php.txt", escape = "none")]
pub struct FilterTemplateData {
    pub namespace: String,
}

#[derive(Template)]
#[template(path = "pagination.php.txt", escape = "none")]
pub struct PaginationTemplateData {
    pub namespace: String,
    pub per_page: u64,
}

/// Starter service provider, created when the project has none
#[derive(Template)]
#[template(path = "app_service_provider.php.txt", escape = "none")]
pub struct ServiceProviderTemplateData {
    pub namespace: String,
}

/// Use case delegating to one repository method
#[derive(Template)]
#[template(path = "use_case.php.txt", escape = "none")]
pub struct UseCaseTemplateData {
    pub namespace: String,
    pub class: String,
    /// Short name of the repository interface
    pub interface: String,
    pub interface_fqcn: String,
    /// Imports `Filter` and `Pagination` when set
    pub uses_support: bool,
    pub support_namespace: String,
    /// `handle()` parameter list
    pub parameters: String,
    /// Repository call, without the `$this->repository->` receiver
    pub call: String,
}

#[derive(Template)]
#[template(path = "use_case_blank.php.txt", escape = "none")]
pub struct BlankUseCaseTemplateData {
    pub namespace: String,
    pub class: String,
}

/// Invokable action for show/create/update/delete
#[derive(Template)]
#[template(path = "action.php.txt", escape = "none")]
pub struct ActionTemplateData {
    pub namespace: String,
    pub class: String,
    /// Sorted fully-qualified imports
    pub imports: Vec<String>,
    /// `__invoke()` parameter list
    pub parameters: String,
    /// Arguments forwarded to the use case
    pub arguments: String,
    /// Expression passed to `successResponse`
    pub response: String,
}

/// List action building `Filter` and `Pagination` from the request
#[derive(Template)]
#[template(path = "action_get_all.php.txt", escape = "none")]
pub struct GetAllActionTemplateData {
    pub namespace: String,
    pub class: String,
    pub imports: Vec<String>,
    pub use_case: String,
    /// Request key holding the model's filters
    pub model: String,
    pub per_page: u64,
}

#[derive(Template)]
#[template(path = "action_blank.php.txt", escape = "none")]
pub struct BlankActionTemplateData {
    pub namespace: String,
    pub class: String,
    pub controller_fqcn: String,
    pub api_responser_fqcn: String,
}

#[derive(Template)]
#[template(path = "api_responser.php.txt", escape = "none")]
pub struct ApiResponserTemplateData {
    pub namespace: String,
}

#[derive(Template)]
#[template(path = "request.php.txt", escape = "none")]
pub struct RequestTemplateData {
    pub namespace: String,
    pub class: String,
    pub rules: Vec<RequestRule>,
}

#[derive(Template)]
#[template(path = "request_blank.php.txt", escape = "none")]
pub struct BlankRequestTemplateData {
    pub namespace: String,
    pub class: String,
}

#[derive(Template)]
#[template(path = "base_request.php.txt", escape = "none")]
pub struct BaseRequestTemplateData {
    pub namespace: String,
}

/// Route group for the five CRUD actions of a model
#[derive(Template)]
#[template(path = "routes.php.txt", escape = "none")]
pub struct RoutesTemplateData {
    pub model: String,
    pub action_namespace: String,
    /// Action class names, sorted
    pub actions: Vec<String>,
    /// URL prefix (`product-categories`)
    pub prefix: String,
    /// Route name prefix (`product-category`)
    pub name: String,
}

#[derive(Template)]
#[template(path = "routes_blank.php.txt", escape = "none")]
pub struct BlankRoutesTemplateData {
    pub class: String,
    pub prefix: String,
    pub name: String,
}

/// Starter `crudgen.toml`
#[derive(Template)]
#[template(path = "crudgen.toml.txt", escape = "none")]
pub struct ConfigTomlTemplateData {
    pub namespace: String,
    pub schema: String,
    pub per_page: u64,
}

/// Render `template`, naming `artifact` in the error.
///
/// Output always ends with a newline.
pub fn render<T: Template>(artifact: &str, template: &T) -> GeneratorResult<String> {
    let mut rendered = template
        .render()
        .map_err(|e| GeneratorError::render(artifact, e))?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Single-quoted PHP string body
pub fn php_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Inline PHP list literal: `['name', 'price']`
pub fn php_list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", php_str(item.as_ref())))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Multi-line PHP map literal for a class property; `[]` when empty
pub fn php_map_literal(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::from("[\n");
    for (key, value) in pairs {
        out.push_str(&format!("        '{}' => '{}',\n", php_str(key), php_str(value)));
    }
    out.push_str("    ]");
    out
}
