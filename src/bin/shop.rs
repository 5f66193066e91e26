//! Command-line storefront client.
//!
//! Browses the catalog of a running store, keeps a cart on local disk and
//! submits it as an order.
//!
//! ```bash
//! shop products --category perfumes
//! shop add p1718000000000 -q 2
//! shop cart
//! shop checkout --name "Sara" --phone 0500000000 --address "Riyadh"
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use gift_store::{
    cart::{Cart, CartStorage, CheckoutDetails, FileCartStorage},
    dto::{
        orders::{CreateOrderRequest, OrderCreated},
        products::ProductList,
    },
    models::Product,
    response::ApiResponse,
};

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Gift store command-line client")]
struct Cli {
    /// Base URL of the store
    #[arg(long, env = "STORE_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Directory the cart is kept in
    #[arg(long, env = "CART_DIR", default_value = ".gift-store")]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products on sale
    Products {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a product to the cart
    Add {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Show the cart
    Cart,
    /// Place an order for everything in the cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Empty the cart
    Clear,
}

struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn products(&self, category: Option<&str>) -> anyhow::Result<Vec<Product>> {
        let mut request = self.http.get(format!("{}/api/products", self.base_url));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        let body: ApiResponse<ProductList> = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data.map(|list| list.items).unwrap_or_default())
    }

    async fn product(&self, id: &str) -> anyhow::Result<Product> {
        let response = self
            .http
            .get(format!("{}/api/products/{id}", self.base_url))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            bail!("no product with id {id}");
        }
        let body: ApiResponse<Product> = response.error_for_status()?.json().await?;
        body.data.context("store returned no product")
    }

    async fn place_order(&self, payload: &CreateOrderRequest) -> anyhow::Result<OrderCreated> {
        let body: ApiResponse<OrderCreated> = self
            .http
            .post(format!("{}/api/orders", self.base_url))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body.data.context("store returned no order")
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = StoreClient::new(&cli.url);
    let mut cart = Cart::load(FileCartStorage::new(&cli.cart_dir));

    match cli.command {
        Commands::Products { category } => {
            let products = client.products(category.as_deref()).await?;
            if products.is_empty() {
                println!("No products right now.");
            }
            for p in products {
                println!(
                    "{:<18} {:<28} {:>10.2}  [{}]",
                    p.id,
                    p.name,
                    p.price,
                    p.category_or_default()
                );
            }
        }
        Commands::Add { id, quantity } => {
            let product = client.product(&id).await?;
            cart.add(&product, quantity)?;
            println!("Added {} to the cart ({} items)", product.name, cart.count());
        }
        Commands::Remove { id } => {
            cart.remove(&id)?;
            println!("Removed {id} ({} items left)", cart.count());
        }
        Commands::Cart => print_cart(&cart),
        Commands::Checkout {
            name,
            phone,
            address,
            email,
            notes,
        } => {
            if cart.is_empty() {
                bail!("the cart is empty, add products first");
            }
            let payload = cart.checkout_request(CheckoutDetails {
                customer_name: name,
                phone,
                email,
                address,
                notes,
            });
            let created = client.place_order(&payload).await?;
            cart.clear()?;
            println!("Order sent. Order number: {}", created.order_id);
        }
        Commands::Clear => {
            cart.clear()?;
            println!("Cart emptied");
        }
    }

    Ok(())
}

fn print_cart<S: CartStorage>(cart: &Cart<S>) {
    if cart.is_empty() {
        println!("The cart is empty.");
        return;
    }
    for item in cart.items() {
        println!(
            "{:<18} {:<28} x{:<3} {:>10.2}",
            item.id,
            item.name,
            item.effective_quantity(),
            item.line_total()
        );
    }
    println!("{:>62.2}", cart.total());
}
