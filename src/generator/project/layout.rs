//! Where each artifact lives in the target project, and under which namespace.

use crate::config::GeneratorConfig;
use std::path::PathBuf;

impl GeneratorConfig {
    pub fn models_namespace(&self) -> String {
        self.ns(&["Models"])
    }

    pub fn model_fqcn(&self, model: &str) -> String {
        format!("{}\\{model}", self.models_namespace())
    }

    pub fn model_path(&self, model: &str) -> PathBuf {
        self.app_path(format!("Models/{model}.php"))
    }

    pub fn base_model_path(&self) -> PathBuf {
        self.app_path("Models/BaseModel.php")
    }

    pub fn factory_path(&self, model: &str) -> PathBuf {
        self.database_path(format!("factories/{model}Factory.php"))
    }

    pub fn repository_namespace(&self, directory: &str) -> String {
        self.ns(&["Repositories", directory])
    }

    pub fn repository_path(&self, directory: &str, class: &str) -> PathBuf {
        self.app_path(format!("Repositories/{directory}/{class}.php"))
    }

    pub fn support_namespace(&self) -> String {
        self.ns(&["Support"])
    }

    pub fn support_path(&self, class: &str) -> PathBuf {
        self.app_path(format!("Support/{class}.php"))
    }

    pub fn use_case_namespace(&self, directory: &str) -> String {
        self.ns(&["UseCases", directory])
    }

    pub fn use_case_path(&self, directory: &str, class: &str) -> PathBuf {
        self.app_path(format!("UseCases/{directory}/{class}.php"))
    }

    pub fn action_namespace(&self, directory: &str) -> String {
        self.ns(&["Http", "Actions", directory])
    }

    pub fn action_path(&self, directory: &str, class: &str) -> PathBuf {
        self.app_path(format!("Http/Actions/{directory}/{class}.php"))
    }

    pub fn controller_fqcn(&self) -> String {
        self.ns(&["Http", "Controllers", "Controller"])
    }

    pub fn traits_namespace(&self) -> String {
        self.ns(&["Traits"])
    }

    pub fn api_responser_fqcn(&self) -> String {
        format!("{}\\ApiResponser", self.traits_namespace())
    }

    pub fn api_responser_path(&self) -> PathBuf {
        self.app_path("Traits/ApiResponser.php")
    }

    pub fn requests_namespace(&self) -> String {
        self.ns(&["Http", "Requests"])
    }

    pub fn request_path(&self, class: &str) -> PathBuf {
        self.app_path(format!("Http/Requests/{class}.php"))
    }

    pub fn route_file_path(&self, class: &str) -> PathBuf {
        self.app_path(format!("Routes/{class}Routes.php"))
    }

    pub fn providers_namespace(&self) -> String {
        self.ns(&["Providers"])
    }
}
