use exchange_config::LoggingConfig;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
	/// Env-filter directive, e.g. `"info"` or `"info,exchange_order=debug"`
	pub filter: String,
	pub with_thread_ids: bool,
	pub with_file_and_line: bool,
	pub with_target: bool,
	pub json_format: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: true,
			with_target: true,
			json_format: false,
		}
	}
}

impl TracingConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.filter = level.as_str().to_lowercase();
		self
	}

	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = filter.into();
		self
	}

	pub fn with_json_format(mut self, json: bool) -> Self {
		self.json_format = json;
		self
	}

	pub fn debug() -> Self {
		Self::default().with_level(Level::DEBUG)
	}

	pub fn production() -> Self {
		Self {
			filter: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: false,
			json_format: true,
		}
	}

	pub fn from_logging(logging: &LoggingConfig) -> Self {
		Self::default()
			.with_filter(logging.level.clone())
			.with_json_format(logging.json)
	}

	/// Parses the filter directive.
	pub fn env_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
		EnvFilter::try_new(&self.filter)
			.map_err(|e| format!("Invalid log filter '{}': {}", self.filter, e).into())
	}
}

/// Initialize tracing with the given configuration.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(
	config: TracingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let subscriber = tracing_subscriber::registry().with(config.env_filter()?);

	if config.json_format {
		let json_layer = tracing_subscriber::fmt::layer()
			.json()
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(json_layer)
			.try_init()
			.map_err(|e| format!("Failed to initialize tracing: {}", e))?;
	} else {
		let fmt_layer = tracing_subscriber::fmt::layer()
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(fmt_layer)
			.try_init()
			.map_err(|e| format!("Failed to initialize tracing: {}", e))?;
	}

	info!("Tracing initialized with filter: {}", config.filter);
	Ok(())
}
