use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::artifact::{ArtifactWriter, GeneratedArtifact, PendingArtifact};
use crate::generator::registration::{ensure_route_autoload, patch_provider, Binding};
use crate::generator::templates::{
    php_list_literal, php_map_literal, php_str, render, ActionTemplateData,
    ApiResponserTemplateData, BaseModelTemplateData, BaseRequestTemplateData,
    BlankActionTemplateData, BlankRequestTemplateData, BlankRoutesTemplateData,
    BlankUseCaseTemplateData, EmptyRepositoryInterfaceTemplateData, EmptyRepositoryTemplateData,
    FactoryField, FactoryTemplateData, FilterTemplateData, GetAllActionTemplateData,
    ModelTemplateData, PaginationTemplateData, RelationView, RepositoryInterfaceTemplateData,
    RepositoryTemplateData, RequestRule, RequestTemplateData, RoutesTemplateData,
    ServiceProviderTemplateData, UseCaseTemplateData,
};
use crate::naming::{kebab, model_for_table, plural, studly, table_for_model};
use crate::prompt::Prompt;
use crate::relations::infer_model;
use crate::schema::{ColumnDescriptor, SchemaIntrospector, SqlType};

/// Columns the factory never fills
const FACTORY_SKIPPED_COLUMNS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

/// Ships with the host framework; `crud` leaves its model alone
const USERS_TABLE: &str = "users";

/// Input of [`Generator::generate_model`]
#[derive(Debug, Clone, Default)]
pub struct ModelRequest {
    pub table: String,
    pub label: String,
    pub plural_label: String,
    /// Also generate a factory
    pub factory: bool,
    /// Print the host-framework command that scaffolds an observer
    pub observer: bool,
}

/// Input of [`Generator::generate_repository`]
#[derive(Debug, Clone, Default)]
pub struct RepositoryRequest {
    /// Repository class name
    pub name: String,
    /// Bound model; `None` produces an empty interface and class
    pub model: Option<String>,
    /// Columns matched by `search`; defaults to the table's text columns
    pub filter_fields: Vec<String>,
}

/// Input of [`Generator::generate_crud`]
#[derive(Debug, Clone, Default)]
pub struct CrudRequest {
    pub model: ModelRequest,
    pub filter_fields: Vec<String>,
}

/// The five operations every CRUD layer carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrudOperation {
    GetAll,
    Show,
    Create,
    Update,
    Delete,
}

impl CrudOperation {
    const ALL: [CrudOperation; 5] = [
        CrudOperation::GetAll,
        CrudOperation::Show,
        CrudOperation::Create,
        CrudOperation::Update,
        CrudOperation::Delete,
    ];

    fn name(self) -> &'static str {
        match self {
            CrudOperation::GetAll => "GetAll",
            CrudOperation::Show => "Show",
            CrudOperation::Create => "Create",
            CrudOperation::Update => "Update",
            CrudOperation::Delete => "Delete",
        }
    }

    fn use_case(self, model: &str) -> String {
        format!("{}{model}UseCase", self.name())
    }

    fn action(self, model: &str) -> String {
        format!("{model}{}Action", self.name())
    }

    /// `handle()` parameters of the use case
    fn handle_parameters(self) -> &'static str {
        match self {
            CrudOperation::GetAll => "Pagination $pagination, Filter $filter",
            CrudOperation::Show | CrudOperation::Delete => "int $id",
            CrudOperation::Create => "array $data",
            CrudOperation::Update => "int $id, array $data",
        }
    }

    fn repository_call(self) -> &'static str {
        match self {
            CrudOperation::GetAll => "getAll($pagination, $filter)",
            CrudOperation::Show => "find($id)",
            CrudOperation::Create => "create($data)",
            CrudOperation::Update => "update($id, $data)",
            CrudOperation::Delete => "delete($id)",
        }
    }

    /// Whether the action reads a request body
    fn takes_body(self) -> bool {
        matches!(self, CrudOperation::Create | CrudOperation::Update)
    }
}

/// A step's decision for one path, made before anything is written
enum Planned {
    Write(PendingArtifact),
    Present {
        kind: &'static str,
        path: PathBuf,
        reason: &'static str,
    },
}

/// Schema-driven CRUD generator.
///
/// Every `generate_*` method renders all artifacts of its step first and only
/// then hands them to the [`ArtifactWriter`], so a failing step writes nothing.
pub struct Generator<'a> {
    config: GeneratorConfig,
    schema: &'a dyn SchemaIntrospector,
    prompt: &'a dyn Prompt,
    writer: ArtifactWriter,
}

impl<'a> Generator<'a> {
    pub fn new(config: GeneratorConfig, schema: &'a dyn SchemaIntrospector, prompt: &'a dyn Prompt) -> Self {
        Self {
            config,
            schema,
            prompt,
            writer: ArtifactWriter::new(false),
        }
    }

    /// Plan artifacts without touching the disk
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.writer = ArtifactWriter::new(dry_run);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn writer(&self) -> &ArtifactWriter {
        &self.writer
    }

    /// Generate a model (and optionally its factory) for a table.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::UserInput`] for a blank table, label or plural label
    /// - [`GeneratorError::Schema`] when the table is unknown
    ///
    /// A declined overwrite is not an error: nothing is written and the
    /// returned list is empty.
    pub fn generate_model(&mut self, request: &ModelRequest) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let table = required(&request.table, "table")?;
        let label = required(&request.label, "label")?;
        let plural_label = required(&request.plural_label, "plural label")?;
        if !self.schema.table_exists(&table) {
            return Err(GeneratorError::Schema(table));
        }

        let model = model_for_table(&table);
        let model_path = self.config.model_path(&model);
        let exists = self.writer.exists(&model_path);
        if exists
            && !self
                .prompt
                .confirm(&format!("Model {model} already exists. Overwrite it?"), false)?
        {
            println!("ℹ️  Kept existing model, nothing generated: {model_path:?}");
            return Ok(Vec::new());
        }

        let snapshot = self.schema.snapshot();
        let inference =
            infer_model(&snapshot, &table).ok_or_else(|| GeneratorError::Schema(table.clone()))?;
        tracing::debug!(
            table = %table,
            relations = inference.relations.len(),
            slugs = inference.slugs.len(),
            "inferred model"
        );

        let contents = render(
            "model",
            &ModelTemplateData {
                namespace: self.config.models_namespace(),
                model: model.clone(),
                table: table.clone(),
                label: php_str(&label),
                plural_label: php_str(&plural_label),
                uses_factory: request.factory,
                fillable_literal: php_list_literal(&inference.fillable),
                casts_literal: php_map_literal(&inference.casts),
                slugs: inference.slugs.clone(),
                relations: inference.relations.iter().map(RelationView::from).collect(),
            },
        )?;
        let mut planned = vec![Planned::Write(if exists {
            PendingArtifact::overwrite("model", model_path, contents)
        } else {
            PendingArtifact::create("model", model_path, contents)
        })];

        planned.push(self.ensure(
            "base model",
            self.config.base_model_path(),
            "Base model already present",
            || {
                render(
                    "base model",
                    &BaseModelTemplateData {
                        namespace: self.config.models_namespace(),
                    },
                )
            },
        )?);

        if request.factory {
            let fields = snapshot
                .table(&table)
                .map(|schema| {
                    schema
                        .columns
                        .iter()
                        .filter(|c| !FACTORY_SKIPPED_COLUMNS.contains(&c.name.as_str()))
                        .map(|c| FactoryField {
                            column: c.name.clone(),
                            faker: c.sql_type.faker_expression().to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            let contents = render(
                "factory",
                &FactoryTemplateData {
                    model: model.clone(),
                    model_fqcn: self.config.model_fqcn(&model),
                    fields,
                },
            )?;
            planned.push(Planned::Write(PendingArtifact::create(
                "factory",
                self.config.factory_path(&model),
                contents,
            )));
        }

        let artifacts = self.finish(planned)?;
        if request.observer {
            println!(
                "ℹ️  Observers are scaffolded by the framework: php artisan make:observer {model}Observer --model={}",
                self.config.model_fqcn(&model)
            );
        }
        Ok(artifacts)
    }

    /// Generate a repository interface and implementation, then bind them in
    /// the service provider.
    ///
    /// Without a model both files are empty shells.
    pub fn generate_repository(&mut self, request: &RepositoryRequest) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let name = studly(&required(&request.name, "repository name")?);
        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(studly);
        let directory = model.clone().unwrap_or_else(|| name.clone());
        let namespace = self.config.repository_namespace(&directory);
        let interface = format!("{name}Interface");
        let support_namespace = self.config.support_namespace();

        let mut planned = Vec::new();
        match &model {
            Some(model) => {
                self.require_model(model)?;
                let searchable = self.searchable_fields(model, &request.filter_fields);
                let interface_contents = render(
                    "repository interface",
                    &RepositoryInterfaceTemplateData {
                        namespace: namespace.clone(),
                        support_namespace: support_namespace.clone(),
                        name: name.clone(),
                    },
                )?;
                let contents = render(
                    "repository",
                    &RepositoryTemplateData {
                        namespace: namespace.clone(),
                        support_namespace: support_namespace.clone(),
                        name: name.clone(),
                        model: model.clone(),
                        model_fqcn: self.config.model_fqcn(model),
                        searchable_literal: php_list_literal(&searchable),
                    },
                )?;
                planned.push(Planned::Write(PendingArtifact::create(
                    "repository interface",
                    self.config.repository_path(&directory, &interface),
                    interface_contents,
                )));
                planned.push(Planned::Write(PendingArtifact::create(
                    "repository",
                    self.config.repository_path(&directory, &name),
                    contents,
                )));
            }
            None => {
                let interface_contents = render(
                    "repository interface",
                    &EmptyRepositoryInterfaceTemplateData {
                        namespace: namespace.clone(),
                        name: name.clone(),
                    },
                )?;
                let contents = render(
                    "repository",
                    &EmptyRepositoryTemplateData {
                        namespace: namespace.clone(),
                        name: name.clone(),
                    },
                )?;
                planned.push(Planned::Write(PendingArtifact::create(
                    "repository interface",
                    self.config.repository_path(&directory, &interface),
                    interface_contents,
                )));
                planned.push(Planned::Write(PendingArtifact::create(
                    "repository",
                    self.config.repository_path(&directory, &name),
                    contents,
                )));
            }
        }

        planned.push(self.ensure(
            "filter",
            self.config.support_path("Filter"),
            "Filter already present",
            || {
                render(
                    "filter",
                    &FilterTemplateData {
                        namespace: support_namespace.clone(),
                    },
                )
            },
        )?);
        planned.push(self.ensure(
            "pagination",
            self.config.support_path("Pagination"),
            "Pagination already present",
            || {
                render(
                    "pagination",
                    &PaginationTemplateData {
                        namespace: support_namespace.clone(),
                        per_page: self.config.default_per_page,
                    },
                )
            },
        )?);

        let imports = vec![
            format!("{namespace}\\{interface}"),
            format!("{namespace}\\{name}"),
        ];
        planned.push(self.register_bindings(&imports, &[Binding::new(&interface, &name)])?);

        self.finish(planned)
    }

    /// Generate the five use cases of a model's CRUD layer
    pub fn generate_use_cases(&mut self, model: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let model = studly(&required(model, "model")?);
        self.require_model(&model)?;

        let namespace = self.config.use_case_namespace(&model);
        let interface = format!("{model}RepositoryInterface");
        let interface_fqcn = format!("{}\\{interface}", self.config.repository_namespace(&model));

        let mut planned = Vec::with_capacity(CrudOperation::ALL.len());
        for op in CrudOperation::ALL {
            let class = op.use_case(&model);
            let contents = render(
                "use case",
                &UseCaseTemplateData {
                    namespace: namespace.clone(),
                    class: class.clone(),
                    interface: interface.clone(),
                    interface_fqcn: interface_fqcn.clone(),
                    uses_support: op == CrudOperation::GetAll,
                    support_namespace: self.config.support_namespace(),
                    parameters: op.handle_parameters().to_string(),
                    call: op.repository_call().to_string(),
                },
            )?;
            planned.push(Planned::Write(PendingArtifact::create(
                "use case",
                self.config.use_case_path(&model, &class),
                contents,
            )));
        }
        self.finish(planned)
    }

    /// Generate an empty use case; `directory` defaults to the class name
    pub fn generate_blank_use_case(
        &mut self,
        name: &str,
        directory: Option<&str>,
    ) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let class = studly(&required(name, "use case name")?);
        let directory = directory_or(directory, &class);
        let contents = render(
            "use case",
            &BlankUseCaseTemplateData {
                namespace: self.config.use_case_namespace(&directory),
                class: class.clone(),
            },
        )?;
        let planned = vec![Planned::Write(PendingArtifact::create(
            "use case",
            self.config.use_case_path(&directory, &class),
            contents,
        ))];
        self.finish(planned)
    }

    /// Generate the five invokable actions of a model.
    ///
    /// Create and update validate through the model's form request; when it
    /// does not exist the operator is asked whether to generate it. Declining
    /// makes those actions read the raw request body instead.
    pub fn generate_actions(&mut self, model: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let model = studly(&required(model, "model")?);
        self.require_model(&model)?;

        let request_class = format!("{model}Request");
        let mut planned = Vec::new();
        let validated = if self.writer.exists(&self.config.request_path(&request_class)) {
            true
        } else if self.prompt.confirm(
            &format!("Form request {request_class} does not exist. Generate it?"),
            true,
        )? {
            planned.extend(self.plan_request(&model)?);
            true
        } else {
            false
        };

        planned.push(self.ensure_api_responser()?);

        let namespace = self.config.action_namespace(&model);
        let use_case_namespace = self.config.use_case_namespace(&model);
        for op in CrudOperation::ALL {
            let class = op.action(&model);
            let use_case = op.use_case(&model);
            let mut imports = vec![
                self.config.controller_fqcn(),
                self.config.api_responser_fqcn(),
                format!("{use_case_namespace}\\{use_case}"),
            ];

            let contents = if op == CrudOperation::GetAll {
                let support = self.config.support_namespace();
                imports.push(format!("{support}\\Filter"));
                imports.push(format!("{support}\\Pagination"));
                imports.push("Illuminate\\Http\\Request".to_string());
                imports.sort();
                render(
                    "action",
                    &GetAllActionTemplateData {
                        namespace: namespace.clone(),
                        class: class.clone(),
                        imports,
                        use_case,
                        model: model.clone(),
                        per_page: self.config.default_per_page,
                    },
                )?
            } else {
                let (request_type, data) = if !op.takes_body() {
                    ("", "")
                } else if validated {
                    imports.push(format!("{}\\{request_class}", self.config.requests_namespace()));
                    (request_class.as_str(), "$request->validated()")
                } else {
                    imports.push("Illuminate\\Http\\Request".to_string());
                    ("Request", "$request->all()")
                };
                imports.sort();
                let (parameters, arguments, response) = action_signature(op, &use_case, request_type, data);
                render(
                    "action",
                    &ActionTemplateData {
                        namespace: namespace.clone(),
                        class: class.clone(),
                        imports,
                        parameters,
                        arguments,
                        response,
                    },
                )?
            };
            planned.push(Planned::Write(PendingArtifact::create(
                "action",
                self.config.action_path(&model, &class),
                contents,
            )));
        }
        self.finish(planned)
    }

    /// Generate an empty action; `directory` defaults to the class name
    pub fn generate_blank_action(
        &mut self,
        name: &str,
        directory: Option<&str>,
    ) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let class = studly(&required(name, "action name")?);
        let directory = directory_or(directory, &class);
        let contents = render(
            "action",
            &BlankActionTemplateData {
                namespace: self.config.action_namespace(&directory),
                class: class.clone(),
                controller_fqcn: self.config.controller_fqcn(),
                api_responser_fqcn: self.config.api_responser_fqcn(),
            },
        )?;
        let planned = vec![
            Planned::Write(PendingArtifact::create(
                "action",
                self.config.action_path(&directory, &class),
                contents,
            )),
            self.ensure_api_responser()?,
        ];
        self.finish(planned)
    }

    /// Generate the route group of a model and make sure route files are autoloaded
    pub fn generate_routes(&mut self, model: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let model = studly(&required(model, "model")?);
        let mut actions: Vec<String> = CrudOperation::ALL.iter().map(|op| op.action(&model)).collect();
        actions.sort();
        let contents = render(
            "routes",
            &RoutesTemplateData {
                model: model.clone(),
                action_namespace: self.config.action_namespace(&model),
                actions,
                prefix: kebab(&plural(&model)),
                name: kebab(&model),
            },
        )?;
        let planned = vec![
            Planned::Write(PendingArtifact::create(
                "routes",
                self.config.route_file_path(&model),
                contents,
            )),
            self.route_autoload()?,
        ];
        self.finish(planned)
    }

    /// Generate a route group with a single placeholder route
    pub fn generate_blank_routes(&mut self, name: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let class = studly(&required(name, "routes name")?);
        let contents = render(
            "routes",
            &BlankRoutesTemplateData {
                class: class.clone(),
                prefix: kebab(&class),
                name: kebab(&class),
            },
        )?;
        let planned = vec![
            Planned::Write(PendingArtifact::create(
                "routes",
                self.config.route_file_path(&class),
                contents,
            )),
            self.route_autoload()?,
        ];
        self.finish(planned)
    }

    /// Generate the form request of a model from its table's column types
    pub fn generate_request(&mut self, model: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let model = studly(&required(model, "model")?);
        let planned = self.plan_request(&model)?;
        self.finish(planned)
    }

    /// Generate a form request with empty rules
    pub fn generate_blank_request(&mut self, name: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let class = studly(&required(name, "request name")?);
        let contents = render(
            "request",
            &BlankRequestTemplateData {
                namespace: self.config.requests_namespace(),
                class: class.clone(),
            },
        )?;
        let planned = vec![
            Planned::Write(PendingArtifact::create(
                "request",
                self.config.request_path(&class),
                contents,
            )),
            self.ensure_base_request()?,
        ];
        self.finish(planned)
    }

    /// Actions followed by routes
    pub fn generate_actions_and_routes(&mut self, model: &str) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let mut artifacts = self.generate_actions(model)?;
        artifacts.extend(self.generate_routes(model)?);
        Ok(artifacts)
    }

    /// Model, repository, use cases, routes and actions for one table.
    ///
    /// The model step is skipped for the `users` table.
    pub fn generate_crud(&mut self, request: &CrudRequest) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let table = required(&request.model.table, "table")?;
        let model = model_for_table(&table);

        let mut artifacts = Vec::new();
        if table == USERS_TABLE {
            println!(
                "⚠️  Skipping model generation for the {USERS_TABLE} table: {:?}",
                self.config.model_path(&model)
            );
        } else {
            artifacts.extend(self.generate_model(&request.model)?);
        }
        artifacts.extend(self.generate_repository(&RepositoryRequest {
            name: format!("{model}Repository"),
            model: Some(model.clone()),
            filter_fields: request.filter_fields.clone(),
        })?);
        artifacts.extend(self.generate_use_cases(&model)?);
        artifacts.extend(self.generate_routes(&model)?);
        artifacts.extend(self.generate_actions(&model)?);
        Ok(artifacts)
    }

    fn plan_request(&self, model: &str) -> GeneratorResult<Vec<Planned>> {
        let table = table_for_model(model);
        let rules = self
            .columns(&table)?
            .into_iter()
            .filter(|c| c.name != "id")
            .map(|c| {
                let rules: Vec<&str> = ["sometimes", "required"]
                    .into_iter()
                    .chain(c.sql_type.validation_rules().iter().copied())
                    .collect();
                RequestRule {
                    rules: rules.join("|"),
                    attribute: php_str(&c.name.replace('_', " ")),
                    column: c.name,
                }
            })
            .collect();
        let class = format!("{model}Request");
        let contents = render(
            "request",
            &RequestTemplateData {
                namespace: self.config.requests_namespace(),
                class: class.clone(),
                rules,
            },
        )?;
        Ok(vec![
            Planned::Write(PendingArtifact::create(
                "request",
                self.config.request_path(&class),
                contents,
            )),
            self.ensure_base_request()?,
        ])
    }

    fn ensure_base_request(&self) -> GeneratorResult<Planned> {
        self.ensure(
            "base request",
            self.config.request_path("BaseRequest"),
            "Base request already present",
            || {
                render(
                    "base request",
                    &BaseRequestTemplateData {
                        namespace: self.config.requests_namespace(),
                    },
                )
            },
        )
    }

    fn ensure_api_responser(&self) -> GeneratorResult<Planned> {
        self.ensure(
            "api responser",
            self.config.api_responser_path(),
            "ApiResponser already present",
            || {
                render(
                    "api responser",
                    &ApiResponserTemplateData {
                        namespace: self.config.traits_namespace(),
                    },
                )
            },
        )
    }

    /// Create `path` only when nothing is there yet
    fn ensure<F>(&self, kind: &'static str, path: PathBuf, reason: &'static str, render: F) -> GeneratorResult<Planned>
    where
        F: FnOnce() -> GeneratorResult<String>,
    {
        if self.writer.exists(&path) {
            return Ok(Planned::Present { kind, path, reason });
        }
        Ok(Planned::Write(PendingArtifact::create(kind, path, render()?)))
    }

    fn register_bindings(&self, imports: &[String], bindings: &[Binding]) -> GeneratorResult<Planned> {
        let path = self.config.provider_path();
        let existing = self.writer.read(&path)?;
        let source = match &existing {
            Some(source) => source.clone(),
            None => render(
                "service provider",
                &ServiceProviderTemplateData {
                    namespace: self.config.providers_namespace(),
                },
            )?,
        };
        let patched = patch_provider(&source, imports, bindings).map_err(|message| GeneratorError::Patch {
            path: path.clone(),
            message,
        })?;

        Ok(match (patched, existing.is_some()) {
            (Some(contents), true) => Planned::Write(PendingArtifact::update("service provider", path, contents)),
            (Some(contents), false) => Planned::Write(PendingArtifact::create("service provider", path, contents)),
            (None, true) => Planned::Present {
                kind: "service provider",
                path,
                reason: "Bindings already registered",
            },
            (None, false) => Planned::Write(PendingArtifact::create("service provider", path, source)),
        })
    }

    fn route_autoload(&self) -> GeneratorResult<Planned> {
        let path = self.config.routes_file_path();
        let existing = self.writer.read(&path)?;
        Ok(match (ensure_route_autoload(existing.as_deref()), existing.is_some()) {
            (Some(contents), true) => Planned::Write(PendingArtifact::update("route file", path, contents)),
            (Some(contents), false) => Planned::Write(PendingArtifact::create("route file", path, contents)),
            (None, _) => Planned::Present {
                kind: "route file",
                path,
                reason: "Route autoload already present",
            },
        })
    }

    fn require_model(&self, model: &str) -> GeneratorResult<()> {
        let path = self.config.model_path(model);
        if self.writer.exists(&path) {
            Ok(())
        } else {
            Err(GeneratorError::MissingModel {
                model: model.to_string(),
                path,
            })
        }
    }

    fn columns(&self, table: &str) -> GeneratorResult<Vec<ColumnDescriptor>> {
        if !self.schema.table_exists(table) {
            return Err(GeneratorError::Schema(table.to_string()));
        }
        Ok(self
            .schema
            .list_columns(table)
            .into_iter()
            .map(|column| {
                let sql_type = self
                    .schema
                    .column_type(table, &column)
                    .unwrap_or_else(|| SqlType::Other("unknown".to_string()));
                ColumnDescriptor::new(column, sql_type)
            })
            .collect())
    }

    /// Explicit fields, else the text columns of the model's table
    fn searchable_fields(&self, model: &str, explicit: &[String]) -> Vec<String> {
        let explicit: Vec<String> = explicit
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if !explicit.is_empty() {
            return explicit;
        }
        let table = table_for_model(model);
        if !self.schema.table_exists(&table) {
            tracing::warn!(model = %model, table = %table, "table not in schema; repository gets no searchable fields");
        }
        self.schema
            .list_columns(&table)
            .into_iter()
            .filter(|column| {
                self.schema
                    .column_type(&table, column)
                    .is_some_and(|t| t.is_text_like())
            })
            .collect()
    }

    fn finish(&mut self, planned: Vec<Planned>) -> GeneratorResult<Vec<GeneratedArtifact>> {
        let mut artifacts = Vec::with_capacity(planned.len());
        for step in planned {
            let artifact = match step {
                Planned::Write(pending) => self.writer.write(pending)?,
                Planned::Present { kind, path, reason } => {
                    let contents = self.writer.read(&path)?.unwrap_or_default();
                    self.writer.unchanged(kind, path, contents, reason)
                }
            };
            artifacts.push(artifact);
        }
        Ok(artifacts)
    }
}

fn required(value: &str, parameter: &str) -> GeneratorResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GeneratorError::UserInput(parameter.to_string()));
    }
    Ok(trimmed.to_string())
}

fn directory_or(directory: Option<&str>, fallback: &str) -> String {
    directory
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(studly)
        .unwrap_or_else(|| fallback.to_string())
}

/// `(parameters, arguments, response)` of a non-list action
fn action_signature(op: CrudOperation, use_case: &str, request_type: &str, data: &str) -> (String, String, String) {
    match op {
        CrudOperation::Show => (
            format!("{use_case} $useCase, int $id"),
            "$id".to_string(),
            "$result?->toArray() ?? []".to_string(),
        ),
        CrudOperation::Create => (
            format!("{request_type} $request, {use_case} $useCase"),
            data.to_string(),
            "$result->toArray()".to_string(),
        ),
        CrudOperation::Update => (
            format!("{request_type} $request, {use_case} $useCase, int $id"),
            format!("$id, {data}"),
            "['updated' => $result]".to_string(),
        ),
        CrudOperation::Delete => (
            format!("{use_case} $useCase, int $id"),
            "$id".to_string(),
            "['deleted' => $result]".to_string(),
        ),
        CrudOperation::GetAll => (
            format!("Request $request, {use_case} $useCase"),
            "$pagination, $filter".to_string(),
            "$result".to_string(),
        ),
    }
}
