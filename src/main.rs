//! Keyshop storefront CLI
//!
//! Browse the catalog and replay a shopping session from the command line.
//!
//! Use `--catalog` to load a different seed file and `--config` to load store settings.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use humanize_duration::{Truncate, prelude::DurationExt};

use keyshop::{
    fixtures::{default_catalog, load_catalog},
    observability,
    prelude::*,
    tables::{write_cart, write_listing, write_product, write_products},
};

#[derive(Debug, Parser)]
#[command(name = "keyshop", about = "Keyboard storefront", long_about = None)]
struct Cli {
    /// Store settings file (YAML)
    #[arg(long, global = true, env = "KEYSHOP_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog seed file (YAML); defaults to the bundled keyboard catalog
    #[arg(long, global = true, env = "KEYSHOP_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search and list products
    List(ListArgs),

    /// Show one product and related products
    Show(ShowArgs),

    /// List featured products
    Featured,

    /// List product categories
    Categories,

    /// Replay a cart session and optionally check out
    Cart(CartArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Free text to search for
    #[arg(short, long)]
    query: Option<String>,

    /// Category to list; ignored when searching
    #[arg(short, long)]
    category: Option<String>,

    /// Sort order
    #[arg(short, long, value_enum, default_value_t)]
    sort: SortOrder,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Lowest price, in minor units
    #[arg(long)]
    min_price: Option<i64>,

    /// Highest price, in minor units
    #[arg(long)]
    max_price: Option<i64>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product id
    id: u32,
}

#[derive(Debug, Args)]
struct CartArgs {
    /// Add a product, as `ID` or `ID:QTY`
    #[arg(long = "add", value_name = "ID[:QTY]", value_parser = parse_line)]
    add: Vec<(ProductId, i64)>,

    /// Set a product's quantity, as `ID:QTY`; 0 removes it
    #[arg(long = "set", value_name = "ID:QTY", value_parser = parse_line)]
    set: Vec<(ProductId, i64)>,

    /// Remove a product
    #[arg(long = "remove", value_name = "ID", value_parser = parse_id)]
    remove: Vec<ProductId>,

    /// Check out with the details in this YAML file
    #[arg(long, value_name = "DETAILS")]
    checkout: Option<PathBuf>,

    /// Override the shipping method from the details file
    #[arg(long, value_enum)]
    shipping: Option<ShippingMethod>,

    /// Simulated payment processing time
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

fn parse_id(s: &str) -> Result<ProductId, String> {
    let raw: u32 = s
        .trim()
        .parse()
        .map_err(|err| format!("invalid product id '{s}': {err}"))?;

    ProductId::new(raw).ok_or_else(|| format!("invalid product id '{s}': must be positive"))
}

fn parse_line(s: &str) -> Result<(ProductId, i64), String> {
    let (id, quantity) = s.split_once(':').unwrap_or((s, "1"));

    let quantity = quantity
        .trim()
        .parse()
        .map_err(|err| format!("invalid quantity in '{s}': {err}"))?;

    Ok((parse_id(id)?, quantity))
}

/// Keyshop storefront CLI
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => StoreSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => StoreSettings::default(),
    };

    observability::init_subscriber(&settings.logging)?;

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => default_catalog()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List(args) => list(&mut out, &catalog, &settings, args),
        Commands::Show(args) => show(&mut out, &catalog, &settings, &args),
        Commands::Featured => {
            let featured = catalog.featured_with_threshold(settings.featured_threshold()?);
            write_products(&mut out, featured)?;
            Ok(())
        }
        Commands::Categories => {
            for category in catalog.categories() {
                writeln!(out, "{category}")?;
            }
            Ok(())
        }
        Commands::Cart(args) => cart(&mut out, &catalog, &settings, args),
    }
}

fn list(
    out: &mut impl Write,
    catalog: &Catalog<'_>,
    settings: &StoreSettings,
    args: ListArgs,
) -> Result<()> {
    let price_range = match (args.min_price, args.max_price) {
        (None, None) => None,
        (min, max) => Some(min.unwrap_or(0)..=max.unwrap_or(i64::MAX)),
    };

    let listing = catalog.listing(&ListingQuery {
        text: args.query,
        category: args.category,
        price_range,
        sort: args.sort,
        page: args.page,
        per_page: settings.page_size,
    });

    write_listing(out, &listing)?;

    Ok(())
}

fn show(
    out: &mut impl Write,
    catalog: &Catalog<'_>,
    settings: &StoreSettings,
    args: &ShowArgs,
) -> Result<()> {
    let Some(product) = ProductId::new(args.id).and_then(|id| catalog.find_by_id(id)) else {
        bail!("Product {} not found", args.id);
    };

    write_product(&mut *out, product)?;

    let related = catalog.related(product.id, settings.related_limit);

    if !related.is_empty() {
        writeln!(out, " Related products")?;
        write_products(&mut *out, related)?;
    }

    Ok(())
}

fn cart(
    out: &mut impl Write,
    catalog: &Catalog<'_>,
    settings: &StoreSettings,
    args: CartArgs,
) -> Result<()> {
    let mut cart = Cart::new(catalog);

    for (id, quantity) in args.add {
        let quantity = u32::try_from(quantity).unwrap_or(0);
        report(&mut *out, id, cart.add_item(id, quantity))?;
    }

    for (id, quantity) in args.set {
        report(&mut *out, id, cart.set_quantity(id, quantity))?;
    }

    for id in args.remove {
        report(&mut *out, id, cart.remove_item(id))?;
    }

    write_cart(&mut *out, &cart)?;

    let Some(details_path) = args.checkout else {
        return Ok(());
    };

    let contents = fs::read_to_string(&details_path)
        .with_context(|| format!("failed to read {}", details_path.display()))?;
    let mut details: CheckoutDetails = serde_norway::from_str(&contents)
        .with_context(|| format!("failed to parse {}", details_path.display()))?;

    if let Some(shipping) = args.shipping {
        details.shipping = shipping;
    }

    let checkout = Checkout::new(settings.pricing()?);

    let start = Instant::now();

    if args.delay_ms > 0 {
        writeln!(out, " Processing payment...")?;
        thread::sleep(Duration::from_millis(args.delay_ms));
    }

    let receipt = checkout.place_order(&mut cart, &details, &mut rand::thread_rng())?;

    let elapsed = start.elapsed();

    receipt.write_to(&mut *out)?;

    writeln!(
        out,
        " Order placed in {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}

fn report(out: &mut impl Write, id: ProductId, update: CartUpdate) -> io::Result<()> {
    match update {
        CartUpdate::Rejected(CartRejection::UnknownProduct) => {
            writeln!(out, " Product {id} not found, skipped")
        }
        CartUpdate::Rejected(CartRejection::OutOfStock) => {
            writeln!(out, " Product {id} is sold out, skipped")
        }
        CartUpdate::Inserted(_)
        | CartUpdate::Updated(_)
        | CartUpdate::Removed
        | CartUpdate::Unchanged => Ok(()),
    }
}
