//! Engine configuration.

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Project whose sections this engine mirrors.
    pub project_id: u64,
    /// Tasks fetched per page, per section.
    pub page_size: u32,
    /// Sections fetched per page on the section-list axis.
    pub section_page_size: u32,
    /// How many section refetches a filter dispatch issues concurrently.
    pub dispatch_batch_size: usize,
    /// Pause between dispatch batches, so many expanded sections do not
    /// saturate the remote boundary.
    pub dispatch_batch_delay_ms: u64,
}

impl EngineConfig {
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            page_size: 20,
            section_page_size: 10,
            dispatch_batch_size: 3,
            dispatch_batch_delay_ms: 50,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_section_page_size(mut self, page_size: u32) -> Self {
        self.section_page_size = page_size;
        self
    }

    pub fn with_dispatch_batch_size(mut self, size: usize) -> Self {
        self.dispatch_batch_size = size.max(1);
        self
    }

    pub fn with_dispatch_batch_delay_ms(mut self, delay: u64) -> Self {
        self.dispatch_batch_delay_ms = delay;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(project_id: u64) -> Self {
        let mut config = Self::new(project_id);

        if let Ok(size) = std::env::var("TASKDECK_PAGE_SIZE") {
            if let Ok(val) = size.parse::<u32>() {
                config.page_size = val;
            }
        }

        if let Ok(size) = std::env::var("TASKDECK_DISPATCH_BATCH") {
            if let Ok(val) = size.parse::<usize>() {
                config.dispatch_batch_size = val.max(1);
            }
        }

        if let Ok(delay) = std::env::var("TASKDECK_DISPATCH_DELAY_MS") {
            if let Ok(val) = delay.parse::<u64>() {
                config.dispatch_batch_delay_ms = val;
            }
        }

        config
    }
}
