use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use marketplace_search::catalog::{
    default_category_graph, default_locations, CatalogSource, JsonCatalog, SeedCatalog,
};
use marketplace_search::config;
use marketplace_search::models::{Category, MarketplaceItem};
use marketplace_search::search::{
    AccessibilityFilter, AvailabilityFilter, PriceRange, SearchEngine, SearchFilters, SortBy,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marketplace-search", version, about = "Search a community marketplace catalog")]
struct Cli {
    /// JSON catalog to search instead of the built-in one
    #[arg(long, global = true, env = "MARKETPLACE_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter, rank and sort catalog items
    Search(SearchArgs),
    /// List every category
    Categories,
    /// List subcategories used within a category
    Subcategories { category: Category },
    /// List places with known coordinates
    Locations,
    /// List the items of one category
    Browse { category: Category },
    /// Best rated items (4.5 and up)
    Top {
        #[arg(default_value_t = 5)]
        limit: usize,
    },
    /// Items within a radius of a named place, nearest first
    Near {
        location: String,
        /// Radius in kilometers
        #[arg(default_value_t = 10.0)]
        radius: f64,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query
    query: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    subcategory: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// Minimum rating, 0 to 5
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long)]
    in_stock: bool,
    #[arg(long)]
    delivery: bool,
    #[arg(long)]
    pickup: bool,
    /// Maximum distance in kilometers from --location
    #[arg(long)]
    distance: Option<f64>,
    #[arg(long)]
    sign_language: bool,
    #[arg(long)]
    audio_description: bool,
    #[arg(long, value_enum, default_value_t = SortBy::Relevance)]
    sort: SortBy,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Also save the full result as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SearchArgs {
    fn filters(&self) -> Result<SearchFilters> {
        if self.distance.is_some_and(|d| !(d >= 0.0)) {
            bail!("--distance must be a non-negative number of kilometers");
        }
        if self.min_rating.is_some_and(|r| !(0.0..=5.0).contains(&r)) {
            bail!("--min-rating must be between 0 and 5");
        }

        let price_range = (self.min_price.is_some() || self.max_price.is_some()).then_some(PriceRange {
            min: self.min_price,
            max: self.max_price,
        });
        let availability = (self.in_stock || self.delivery || self.pickup).then_some(AvailabilityFilter {
            in_stock: self.in_stock,
            delivery: self.delivery,
            pickup: self.pickup,
        });
        let accessibility = (self.sign_language || self.audio_description).then_some(AccessibilityFilter {
            sign_language: self.sign_language,
            audio_description: self.audio_description,
        });

        Ok(SearchFilters {
            query: self.query.clone(),
            category: self.category,
            subcategory: self.subcategory.clone(),
            location: self.location.clone(),
            price_range,
            rating: self.min_rating,
            availability,
            distance: self.distance,
            accessibility,
            sort_by: self.sort,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source: Box<dyn CatalogSource> = match cli.catalog {
        Some(path) => Box::new(JsonCatalog::new(path)),
        None => Box::new(SeedCatalog::new()),
    };
    let items = source.load().await?;
    info!("Catalog '{}' ready with {} items", source.source_name(), items.len());

    let engine = SearchEngine::new(items, default_locations(), default_category_graph())
        .with_latency(config::search_latency());

    match cli.command {
        Command::Search(args) => run_search(&engine, args).await?,
        Command::Categories => {
            for category in engine.categories() {
                println!("{category}");
            }
        }
        Command::Subcategories { category } => {
            for sub in engine.subcategories(category) {
                println!("{sub}");
            }
        }
        Command::Locations => {
            for name in engine.locations() {
                println!("{name}");
            }
        }
        Command::Browse { category } => print_items(&engine.items_by_category(category)),
        Command::Top { limit } => print_items(&engine.top_rated(limit)),
        Command::Near { location, radius } => {
            if !(radius >= 0.0) {
                bail!("radius must be a non-negative number of kilometers");
            }
            let near = engine.items_near_location(&location, radius);
            info!("{} items within {} km of {}", near.len(), radius, location);
            print_items(&near);
        }
    }

    Ok(())
}

async fn run_search(engine: &SearchEngine, args: SearchArgs) -> Result<()> {
    let filters = args.filters()?;
    let result = engine.search_async(filters).await;
    info!("Found {} matching items", result.total_count);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_items(&result.items);
        if !result.suggestions.is_empty() {
            println!("Suggestions: {}", result.suggestions.join(", "));
        }
        if !result.related_categories.is_empty() {
            let related: Vec<&str> = result.related_categories.iter().map(|c| c.name()).collect();
            println!("Related categories: {}", related.join(", "));
        }
    }

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&result)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved search result to {}", path.display());
    }

    Ok(())
}

fn print_items(items: &[MarketplaceItem]) {
    for (i, item) in items.iter().enumerate() {
        match item.price {
            Some(price) => println!("{}. {} (${:.2})", i + 1, item.title, price),
            None => println!("{}. {}", i + 1, item.title),
        }
        println!("   {} · {}", item.kind.label(), item.category);
        if let Some(location) = &item.location {
            println!("   Location: {}", location);
        }
        if let Some(rating) = item.rating {
            println!("   Rating: {:.1}", rating);
        }
        if !item.tags.is_empty() {
            println!("   Tags: {}", item.tags.join(", "));
        }
        println!("   ID: {}", item.id);
        println!();
    }
}
