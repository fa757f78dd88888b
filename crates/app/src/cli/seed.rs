use clap::Args;
use rust_decimal::Decimal;
use trolley_app::{
    context::AppContext,
    domain::{
        carts::models::{CartStatus, NewCart},
        customers::Customer,
        items::{ItemSource, LineItem, ProductUuid},
    },
};

use super::reset;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// Email recorded on the demo cart's customer
    #[arg(long, default_value = "demo@example.com")]
    email: String,

    /// Catalog product the demo line item refers to; generated when omitted
    #[arg(long)]
    product: Option<ProductUuid>,
}

fn demo_cart(args: &SeedArgs) -> NewCart {
    NewCart {
        status: CartStatus::Active,
        customer: Customer {
            customer_id: None,
            email: args.email.clone(),
            name: None,
            phone: None,
        },
        items: vec![LineItem {
            source: ItemSource::Catalog {
                product_id: args.product.unwrap_or_default(),
            },
            name: "Classic Tee".to_string(),
            description: "Cotton crew neck".to_string(),
            price: Decimal::from(75),
            quantity: Decimal::ONE,
            sku: "TEE-CLASSIC-M".to_string(),
            slug: "classic-tee-m".to_string(),
            options: vec!["M".to_string()],
            categories: Vec::new(),
            tags: vec!["apparel".to_string()],
            discounts: Vec::new(),
        }],
        discounts: Vec::new(),
        delivery_charge: Decimal::ZERO,
        remarks: String::new(),
        created_by: "seed".to_string(),
    }
}

pub(crate) async fn run(app: &AppContext, args: SeedArgs) -> Result<(), String> {
    reset::reset(app).await?;

    let session = app
        .checkout
        .start_session(demo_cart(&args))
        .await
        .map_err(|error| format!("failed to seed cart: {error}"))?;

    println!("cart_uuid: {}", session.cart_uuid);
    println!("session: {}", session.token);

    Ok(())
}
