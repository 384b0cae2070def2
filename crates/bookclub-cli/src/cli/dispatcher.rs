use crate::cli::command_handlers::{
    ConfigHandler, CreateHandler, DeleteHandler, ListHandler, NavHandler,
};
use crate::cli::main_types::{BookCommands, CatalogCommands, Commands};
use bookclub_core::api::client::{ApiClient, ClientConfig};
use bookclub_core::core::services::resource_service::ResourceService;
use bookclub_core::core::services::types::Resource;
use bookclub_core::error::{AppError, CliError, ConfigError};
use bookclub_core::storage::config::Config;
use bookclub_core::storage::credentials::resolve_token;
use bookclub_core::utils::logging::print_verbose;
use bookclub_core::utils::validation::{validate_token, validate_url};
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    api_url: Option<String>,
    token: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        api_url: Option<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            api_url,
            token,
        }
    }

    // Flag > BOOKCLUB_API_URL > config file
    fn get_url(&self) -> Result<String, AppError> {
        let url = self.config.resolve_url(self.api_url.clone()).ok_or_else(|| {
            AppError::Config(ConfigError::MissingField {
                field: "Catalog API URL".to_string(),
                hint: "Use 'bookclub config set --url <url>' or set BOOKCLUB_API_URL".to_string(),
            })
        })?;
        validate_url(&url)?;
        Ok(url)
    }

    fn create_client(&self) -> Result<ApiClient, AppError> {
        let url = self.get_url()?;
        log::debug!("catalog API at {}", url);
        let mut config = ClientConfig::new(url);
        match resolve_token(self.token.clone()) {
            Some(token) => {
                validate_token(&token)?;
                self.log_verbose("Creating client with bearer token");
                config = config.with_token(token);
            }
            None => self.log_verbose("Creating client without bearer token"),
        }
        Ok(ApiClient::new(config)?)
    }

    fn create_service(&self, resource: Resource) -> Result<ResourceService, AppError> {
        Ok(ResourceService::new(self.create_client()?, resource))
    }

    // Writes are never sent anonymously.
    fn require_token(&self) -> Result<(), AppError> {
        if resolve_token(self.token.clone()).is_none() {
            return Err(AppError::Cli(CliError::AuthRequired {
                message: "Creating or deleting records requires a bearer token".to_string(),
                hint: "Set BOOKCLUB_API_TOKEN or pass --token".to_string(),
            }));
        }
        Ok(())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let mut config = self.config.clone();
                ConfigHandler::new()
                    .handle(command, &mut config, self.config_path.clone(), self.verbose)
            }
            Commands::Nav { path } => {
                NavHandler::new().handle(&path);
                Ok(())
            }
            Commands::Books { command } => match command {
                BookCommands::List(args) => {
                    let service = self.create_service(Resource::Books)?;
                    ListHandler::new(&self.config)
                        .handle(args, service, self.verbose)
                        .await
                }
                BookCommands::Create(args) => {
                    self.require_token()?;
                    let service = self.create_service(Resource::Books)?;
                    CreateHandler::new().handle(args, &service, self.verbose).await
                }
                BookCommands::Delete { id } => {
                    self.require_token()?;
                    let service = self.create_service(Resource::Books)?;
                    DeleteHandler::new().handle(id, &service, self.verbose).await
                }
            },
            Commands::Authors { command } => self.dispatch_catalog(Resource::Authors, command).await,
            Commands::Genres { command } => self.dispatch_catalog(Resource::Genres, command).await,
        }
    }

    async fn dispatch_catalog(
        &self,
        resource: Resource,
        command: CatalogCommands,
    ) -> Result<(), AppError> {
        let service = self.create_service(resource)?;
        match command {
            CatalogCommands::List(args) => {
                ListHandler::new(&self.config)
                    .handle(args, service, self.verbose)
                    .await
            }
            CatalogCommands::Create(args) => {
                self.require_token()?;
                CreateHandler::new().handle(args, &service, self.verbose).await
            }
        }
    }
}
