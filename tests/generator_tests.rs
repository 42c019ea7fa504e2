mod common;

use common::temp_files;
use crudgen::generator::{ArtifactStatus, CrudRequest, Generator, ModelRequest};
use crudgen::prompt::{DefaultPrompt, FixedPrompt, ScriptedPrompt};
use crudgen::schema::load_schema;
use crudgen::GeneratorConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn product_crud() -> CrudRequest {
    CrudRequest {
        model: ModelRequest {
            table: "products".to_string(),
            label: "Product".to_string(),
            plural_label: "Products".to_string(),
            factory: true,
            observer: false,
        },
        filter_fields: vec!["name".to_string(), "sku".to_string()],
    }
}

/// Every file under `root` with its contents
fn tree(root: &Path) -> BTreeMap<PathBuf, String> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let contents = fs::read_to_string(&path).unwrap();
                files.insert(path.strip_prefix(root).unwrap().to_path_buf(), contents);
            }
        }
    }
    files
}

#[test]
fn test_crud_from_fixture_schema() {
    let project = temp_files::temp_project();
    let root = project.path();
    let schema = load_schema(&temp_files::shop_schema_path()).unwrap();
    let prompt = DefaultPrompt;
    let mut generator = Generator::new(GeneratorConfig::with_root(root), &schema, &prompt);

    let artifacts = generator.generate_crud(&product_crud()).unwrap();
    assert!(artifacts.iter().any(|a| a.kind == "model" && a.status == ArtifactStatus::Created));

    let model = temp_files::read_file(root, "app/Models/Product.php");
    assert!(model.contains("class Product extends BaseModel"));
    assert!(model.contains("return $this->belongsToMany(Tag::class, 'product_tag');"));
    assert!(model.contains("'attributes' => 'array',"));

    let repository = temp_files::read_file(root, "app/Repositories/Product/ProductRepository.php");
    assert!(repository.contains("['name', 'sku']"));

    let request = temp_files::read_file(root, "app/Http/Requests/ProductRequest.php");
    assert!(request.contains("'price' => 'sometimes|required|numeric',"));
    assert!(request.contains("'category id'"));

    let routes = temp_files::read_file(root, "app/Routes/ProductRoutes.php");
    assert!(routes.contains("Route::prefix('products')"));
    assert!(routes.contains("->name('product.')"));

    let provider = temp_files::read_file(root, "app/Providers/AppServiceProvider.php");
    assert_eq!(
        provider
            .matches("$this->app->bind(ProductRepositoryInterface::class, ProductRepository::class);")
            .count(),
        1
    );
    let api = temp_files::read_file(root, "routes/api.php");
    assert_eq!(api.matches("app_path('Routes/*.php')").count(), 1);
}

#[test]
fn test_second_crud_run_changes_nothing_when_overwrite_declined() {
    let project = temp_files::temp_project();
    let root = project.path();
    let schema = load_schema(&temp_files::shop_schema_path()).unwrap();

    let first = DefaultPrompt;
    Generator::new(GeneratorConfig::with_root(root), &schema, &first)
        .generate_crud(&product_crud())
        .unwrap();
    let before = tree(root);

    let second = FixedPrompt(false);
    let artifacts = Generator::new(GeneratorConfig::with_root(root), &schema, &second)
        .generate_crud(&product_crud())
        .unwrap();

    assert!(artifacts.iter().all(|a| a.status == ArtifactStatus::Skipped));
    assert_eq!(tree(root), before);
}

#[test]
fn test_existing_provider_is_patched_not_replaced() {
    let project = temp_files::temp_project();
    let root = project.path();
    temp_files::write_file(
        root,
        "app/Providers/AppServiceProvider.php",
        "<?php\n\nnamespace App\\Providers;\n\nuse Illuminate\\Support\\ServiceProvider;\n\nclass AppServiceProvider extends ServiceProvider\n{\n    public function register(): void\n    {\n        $this->app->singleton('clock', fn () => now());\n    }\n}\n",
    );
    let schema = load_schema(&temp_files::shop_schema_path()).unwrap();
    let prompt = ScriptedPrompt::new([true]);
    let mut generator = Generator::new(GeneratorConfig::with_root(root), &schema, &prompt);

    generator.generate_crud(&product_crud()).unwrap();

    let provider = temp_files::read_file(root, "app/Providers/AppServiceProvider.php");
    assert!(provider.contains("$this->app->singleton('clock', fn () => now());"));
    assert!(provider.contains("use App\\Repositories\\Product\\ProductRepositoryInterface;"));
    assert!(provider.contains("$this->app->bind(ProductRepositoryInterface::class, ProductRepository::class);"));
}
