//! DashCart CLI - terminal dashboard for the product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Log in against a local server
//! dashcart login -u emilys -p emilyspass
//!
//! # Browse and filter the catalog
//! dashcart products list --category beauty --max-price 20
//!
//! # Fill the cart and check out
//! dashcart cart add 1 -q 2
//! dashcart checkout --full-name "Emily Johnson" --email emily@example.com \
//!     --phone 5550001111 --address "1 Main St" --city Phoenix --zip 29112
//!
//! # Review and cancel orders
//! dashcart orders list
//! dashcart orders cancel ORD-1718000000500
//! ```
//!
//! # Environment Variables
//!
//! - `DASHCART_SERVER_URL` - Server base URL (default: <http://127.0.0.1:3000>)
//! - `DASHCART_DATA_DIR` - Directory of the persisted stores (default: ~/.config/dashcart)
//! - `RUST_LOG` - Log filter (default: warn)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use dashcart_cli::config::{DEFAULT_DATA_DIR, DEFAULT_SERVER_URL};
use dashcart_cli::{ClientConfig, ClientError, Dashboard, Result, render};
use dashcart_core::models::{CheckoutDetails, DEFAULT_PAGE_SIZE, ProductForm, ProductPatch, User};
use dashcart_core::stores::{DEFAULT_MAX_PRICE, UiFilters};
use dashcart_core::{OrderId, ProductId};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "dashcart")]
#[command(author, version, about = "DashCart terminal dashboard")]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = "DASHCART_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Directory holding the persisted stores
    #[arg(long, global = true, env = "DASHCART_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and start a session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the user the server sees for this session
    Whoami,
    /// Browse and manage the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Edit the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the whole cart
    Checkout(CheckoutArgs),
    /// Review placed orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Carts stored remotely for the session user
    Carts {
        #[command(subcommand)]
        action: CartsAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List one page of products
    List(ListArgs),
    /// Show one product
    Show { id: ProductId },
    /// List product categories
    Categories,
    /// Create a product
    Add(ProductFields),
    /// Update fields of a product
    Update {
        id: ProductId,

        #[command(flatten)]
        fields: PatchFields,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    limit: u32,

    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    page: u32,

    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,
}

impl ListArgs {
    fn filters(&self) -> UiFilters {
        let mut filters = UiFilters::default();
        if let Some(search) = &self.search {
            filters.set_search_query(search.as_str());
        }
        if let Some(category) = &self.category {
            filters.set_selected_category(category.as_str());
        }
        filters.set_price_range(
            self.min_price.unwrap_or(Decimal::ZERO),
            self.max_price
                .unwrap_or_else(|| Decimal::from(DEFAULT_MAX_PRICE)),
        );
        filters
    }
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    category: String,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,

    #[arg(long)]
    thumbnail: Option<String>,
}

impl From<ProductFields> for ProductForm {
    fn from(fields: ProductFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            brand: fields.brand,
            stock: fields.stock,
            thumbnail: fields.thumbnail,
        }
    }
}

#[derive(Args)]
struct PatchFields {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    price: Option<Decimal>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,

    #[arg(long)]
    thumbnail: Option<String>,
}

impl From<PatchFields> for ProductPatch {
    fn from(fields: PatchFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            brand: fields.brand,
            stock: fields.stock,
            thumbnail: fields.thumbnail,
        }
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// Add units of a product
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line (0 removes it)
    Set {
        id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
    /// Show the cart
    Show,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long = "zip")]
    zip_code: String,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders, newest first
    List,
    /// Show one order
    Show { id: String },
    /// Cancel (delete) an order
    Cancel { id: String },
}

#[derive(Subcommand)]
enum CartsAction {
    /// List remote carts
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::new(&cli.server, &cli.data_dir)?;
    let mut dashboard = Dashboard::open(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            let user = dashboard.login(&username, &password).await?;
            println!("Logged in as {}", render::user(&user));
        }
        Commands::Logout => {
            dashboard.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match dashboard.current_user().await? {
            Some(user) => println!("{}", render::user(&user)),
            None if dashboard.session_user().is_some() => {
                println!("Session expired, log in again");
            }
            None => println!("Not logged in"),
        },
        Commands::Products { action } => products(&dashboard, action).await?,
        Commands::Cart { action } => cart(&mut dashboard, action).await?,
        Commands::Checkout(args) => {
            let details = checkout_details(&dashboard, args);
            let order = dashboard.checkout(&details).await?;
            println!("Order placed\n{}", render::order(&order));
        }
        Commands::Orders { action } => match action {
            OrderAction::List => println!("{}", render::orders(dashboard.orders())),
            OrderAction::Show { id } => {
                let id = OrderId::new(id);
                let order = dashboard
                    .stores()
                    .orders
                    .get()
                    .get(&id)
                    .ok_or_else(|| ClientError::NotFound(format!("Order {id}")))?;
                println!("{}", render::order(order));
            }
            OrderAction::Cancel { id } => {
                let id = OrderId::new(id);
                dashboard.cancel_order(&id)?;
                println!("Order {id} cancelled");
            }
        },
        Commands::Carts {
            action: CartsAction::List,
        } => {
            let carts = dashboard.remote_carts().await?;
            println!("{}", render::remote_carts(&carts));
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn products(dashboard: &Dashboard, action: ProductAction) -> Result<()> {
    match action {
        ProductAction::List(args) => {
            let filters = args.filters();
            let page = dashboard.products(&filters, args.page, args.limit).await?;
            println!("{}", render::product_table(&page));
            if let Some(note) = render::active_filters(&filters) {
                println!("{note}");
            }
        }
        ProductAction::Show { id } => {
            let product = dashboard.product(id).await?;
            println!("{}", render::product_detail(&product));
        }
        ProductAction::Categories => {
            let categories = dashboard.categories().await?;
            println!("{}", render::categories(&categories));
        }
        ProductAction::Add(fields) => {
            let product = dashboard.add_product(&fields.into()).await?;
            println!("Created\n{}", render::product_detail(&product));
        }
        ProductAction::Update { id, fields } => {
            let product = dashboard.update_product(id, fields.into()).await?;
            println!("Updated\n{}", render::product_detail(&product));
        }
        ProductAction::Delete { id } => {
            dashboard.delete_product(id).await?;
            println!("Product {id} deleted");
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn cart(dashboard: &mut Dashboard, action: CartAction) -> Result<()> {
    match action {
        CartAction::Add { id, quantity } => match dashboard.add_to_cart(id, quantity).await? {
            Some(line) => println!(
                "{} x {} in cart (stock {})",
                line.quantity, line.title, line.stock
            ),
            None => println!("Product {id} is out of stock"),
        },
        CartAction::Set { id, quantity } => dashboard.set_cart_quantity(id, quantity)?,
        CartAction::Remove { id } => dashboard.remove_from_cart(id)?,
        CartAction::Clear => dashboard.clear_cart()?,
        CartAction::Show => {}
    }
    println!("{}", render::cart(dashboard.cart()));
    Ok(())
}

/// Checkout form, with name and email prefilled from the session user.
fn checkout_details(dashboard: &Dashboard, args: CheckoutArgs) -> CheckoutDetails {
    let user = dashboard.session_user();
    CheckoutDetails {
        full_name: args
            .full_name
            .or_else(|| user.map(User::full_name))
            .unwrap_or_default(),
        email: args
            .email
            .or_else(|| user.map(|u| u.email.clone()))
            .unwrap_or_default(),
        phone: args.phone,
        address: args.address,
        city: args.city,
        zip_code: args.zip_code,
    }
}
