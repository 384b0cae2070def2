use crate::cli::main_types::{ConfigCommands, CreateArgs, ListArgs};
use bookclub_core::actions::delete_book;
use bookclub_core::core::services::columns;
use bookclub_core::core::services::resource_service::{ResourceService, RetryingFetcher};
use bookclub_core::core::services::traits::{CreateService, DeleteService};
use bookclub_core::datatable::filters::parse_assignment;
use bookclub_core::datatable::{
    ColumnSort, DataTable, FetchOutcome, FetchTicket, LoadMode, Pagination, TableEvent,
    TableOptions,
};
use bookclub_core::display::TableDisplay;
use bookclub_core::error::{AppError, CliError, DisplayError};
use bookclub_core::navigation::{breadcrumb_line, breadcrumbs};
use bookclub_core::storage::config::Config;
use bookclub_core::storage::credentials::{TOKEN_ENV, has_api_token};
use bookclub_core::utils::logging::print_verbose;
use bookclub_core::utils::retry::RetryConfig;
use bookclub_core::utils::validation::{validate_page_size, validate_url};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Showing current configuration");

                println!("Current Configuration:");
                println!("=====================");
                match config.resolve_url(None) {
                    Some(url) => println!("API URL: {}", url),
                    None => println!("API URL: (not set)"),
                }
                println!("Page Size: {}", config.page_size());
                println!("Search Debounce: {}ms", config.debounce_ms());

                if has_api_token() {
                    println!("API Token: ✅ Set ({})", TOKEN_ENV);
                } else {
                    println!("API Token: ❌ Not set");
                }
                Ok(())
            }
            ConfigCommands::Set {
                url,
                page_size,
                debounce_ms,
            } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Setting configuration - url: {:?}, page_size: {:?}, debounce_ms: {:?}",
                        url, page_size, debounce_ms
                    ),
                );

                let mut updated_fields = Vec::new();
                if let Some(url_value) = url {
                    validate_url(&url_value)?;
                    updated_fields.push(format!("URL to: {}", url_value));
                    config.api_url = Some(url_value);
                }
                if let Some(size) = page_size {
                    validate_page_size(size)?;
                    config.page_size = Some(size);
                    updated_fields.push(format!("page size to: {}", size));
                }
                if let Some(delay) = debounce_ms {
                    config.debounce_ms = Some(delay);
                    updated_fields.push(format!("search debounce to: {}ms", delay));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url, --page-size and/or --debounce-ms".to_string(),
                    )));
                }

                config.save(config_path)?;
                println!("✅ Set {}", updated_fields.join(", "));
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

/// Drives a manual-mode table: apply the query, then press "load more"
/// until enough pages are in.
pub struct ListHandler {
    page_size: u32,
}

impl ListHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            page_size: config.page_size(),
        }
    }

    pub async fn handle(
        &self,
        args: ListArgs,
        service: ResourceService,
        verbose: bool,
    ) -> Result<(), AppError> {
        let resource = service.resource();
        let mut table = self.build_table(&service, &args)?;

        let now = Instant::now();
        let mut ticket: Option<FetchTicket> = None;
        for event in query_events(&args, now)? {
            // Each change supersedes the ticket before it.
            ticket = table.handle(event)?.or(ticket);
        }
        let mut ticket = ticket.or_else(|| table.start());

        log::debug!("listing {} from epoch {}", resource, table.source().epoch());
        let fetcher = RetryingFetcher::new(service, RetryConfig::default());
        let page_limit = if args.all { None } else { Some(args.pages.max(1)) };
        let mut pages = 0u32;

        while let Some(current) = ticket.take() {
            print_verbose(
                verbose,
                &format!("Fetching {} with {:?}", resource, current.query.to_query_pairs()),
            );
            match table.run(current, &fetcher).await {
                FetchOutcome::Appended { added } => {
                    pages += 1;
                    print_verbose(verbose, &format!("Page {} added {} rows", pages, added));
                }
                FetchOutcome::Failed(error) => return Err(error.into()),
                FetchOutcome::Stale => {
                    log::warn!("list query changed while a page was loading");
                    break;
                }
            }
            if page_limit.is_some_and(|limit| pages >= limit) {
                break;
            }
            ticket = table.handle(TableEvent::LoadMore)?;
        }

        if args.json {
            let json = serde_json::to_string_pretty(table.rows())
                .map_err(|e| DisplayError::TableFormat(e.to_string()))?;
            println!("{}", json);
        } else {
            let display = TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout));
            println!("{}", display.render_data_table(&table));
            println!("{}", display.render_summary(&table));
        }
        Ok(())
    }

    fn build_table(
        &self,
        service: &ResourceService,
        args: &ListArgs,
    ) -> Result<DataTable<Value>, AppError> {
        let resource = service.resource();
        let options = TableOptions {
            page_size: validate_page_size(args.size.unwrap_or(self.page_size))?,
            pagination: if args.cursor {
                Pagination::Cursor
            } else {
                Pagination::PageIndex
            },
            mode: LoadMode::Manual,
            ..TableOptions::default()
        };
        Ok(DataTable::new(
            columns::table_state(resource),
            columns::toolbar(resource).with_debounce(Duration::ZERO),
            options,
        ))
    }
}

/// Table events for the sort, filters and search given on the command line.
fn query_events(args: &ListArgs, now: Instant) -> Result<Vec<TableEvent>, AppError> {
    let mut events = Vec::new();

    if let Some(sort) = &args.sort {
        let sort = if args.desc {
            ColumnSort::desc(sort.as_str())
        } else {
            ColumnSort::asc(sort.as_str())
        };
        events.push(TableEvent::SetSort(Some(sort)));
    }

    for assignment in &args.filter {
        let filter = parse_assignment(assignment).ok_or_else(|| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Invalid filter '{}': expected column=value[,value...]",
                assignment
            )))
        })?;
        events.push(TableEvent::SetColumnFilter {
            column: filter.id,
            value: Some(filter.value),
        });
    }

    if let Some(search) = &args.search {
        events.push(TableEvent::SearchInput {
            text: search.clone(),
            now,
        });
        events.push(TableEvent::Tick(now));
    }

    Ok(events)
}

#[derive(Default)]
pub struct CreateHandler;

impl CreateHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle<S>(
        &self,
        args: CreateArgs,
        service: &S,
        verbose: bool,
    ) -> Result<(), AppError>
    where
        S: CreateService + ?Sized,
    {
        let body: Value = serde_json::from_str(&args.data).map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!("--data is not valid JSON: {}", e)))
        })?;
        if !body.is_object() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "--data must be a JSON object".to_string(),
            )));
        }

        print_verbose(verbose, &format!("Creating record: {}", body));
        let created = service.create(&body).await?;
        println!("✅ Created");
        println!(
            "{}",
            serde_json::to_string_pretty(&created)
                .map_err(|e| DisplayError::TableFormat(e.to_string()))?
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct DeleteHandler;

impl DeleteHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle<S>(&self, id: u64, service: &S, verbose: bool) -> Result<(), AppError>
    where
        S: DeleteService + ?Sized,
    {
        print_verbose(verbose, &format!("Deleting book {}", id));
        let notification = delete_book(service, id).await;
        if notification.is_error {
            return Err(AppError::Cli(CliError::ActionFailed {
                title: notification.title,
                message: notification.message,
            }));
        }
        println!("✅ {} {}", notification.title, notification.message);
        Ok(())
    }
}

#[derive(Default)]
pub struct NavHandler;

impl NavHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, path: &str) {
        let crumbs = breadcrumbs(path);
        if crumbs.is_empty() {
            println!("(root)");
            return;
        }
        println!("{}", breadcrumb_line(path));
        let rows: Vec<Vec<String>> = crumbs
            .into_iter()
            .map(|crumb| {
                let marker = if crumb.is_active { "*" } else { "" };
                vec![crumb.title, crumb.path, marker.to_string()]
            })
            .collect();
        let display = TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout));
        println!("{}", display.render_simple_table(&["Title", "Path", "Current"], &rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::datatable::FilterValue;
    use bookclub_core::error::ApiError;
    use std::sync::Mutex;

    #[test]
    fn test_query_events_order() {
        let args = ListArgs {
            sort: Some("createdAt".to_string()),
            desc: true,
            search: Some("dune".to_string()),
            filter: vec!["genres=fiction,drama".to_string()],
            ..ListArgs::default()
        };
        let now = Instant::now();
        let events = query_events(&args, now).unwrap();
        assert_eq!(
            events,
            vec![
                TableEvent::SetSort(Some(ColumnSort::desc("createdAt"))),
                TableEvent::SetColumnFilter {
                    column: "genres".to_string(),
                    value: Some(FilterValue::Many(vec![
                        "fiction".to_string(),
                        "drama".to_string()
                    ])),
                },
                TableEvent::SearchInput {
                    text: "dune".to_string(),
                    now
                },
                TableEvent::Tick(now),
            ]
        );
    }

    #[test]
    fn test_query_events_rejects_bad_filter() {
        let args = ListArgs {
            filter: vec!["genres".to_string()],
            ..ListArgs::default()
        };
        assert!(query_events(&args, Instant::now()).is_err());
    }

    #[test]
    fn test_config_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        ConfigHandler::new()
            .handle(
                ConfigCommands::Set {
                    url: Some("http://localhost:8080".to_string()),
                    page_size: Some(25),
                    debounce_ms: None,
                },
                &mut config,
                Some(path.clone()),
                false,
            )
            .unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(loaded.page_size(), 25);
    }

    #[test]
    fn test_config_set_requires_a_value() {
        let mut config = Config::default();
        let result = ConfigHandler::new().handle(
            ConfigCommands::Set {
                url: None,
                page_size: None,
                debounce_ms: None,
            },
            &mut config,
            None,
            false,
        );
        assert!(result.is_err());
    }

    struct FailingDeleter(Mutex<u32>);

    #[async_trait::async_trait]
    impl DeleteService for FailingDeleter {
        async fn delete(&self, _id: u64) -> Result<(), ApiError> {
            *self.0.lock().unwrap() += 1;
            Err(ApiError::Transport {
                endpoint: "/books/1".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_delete_failure_becomes_error() {
        let deleter = FailingDeleter(Mutex::new(0));
        let err = DeleteHandler::new().handle(1, &deleter, false).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Cli(CliError::ActionFailed { ref title, .. }) if title == "Error!"
        ));
        assert_eq!(*deleter.0.lock().unwrap(), 1);
    }
}
