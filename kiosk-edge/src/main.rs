use std::sync::Arc;

use anyhow::Context;
use kiosk_edge::{
    AuthService, CartManager, CatalogService, Config, FileFlagStore, OtpVerifier, Selection,
    calculate_bill, setup_environment,
};
use shared::CatalogQuery;
use tokio::sync::broadcast::error::RecvError;

/// Mobile number used by the scripted session
const DEMO_MOBILE: &str = "9876543210";

fn load_catalog(config: &Config) -> anyhow::Result<CatalogService> {
    let catalog = match &config.catalog_path {
        Some(path) => CatalogService::load(path)
            .with_context(|| format!("failed to load catalog from {path}"))?,
        None => CatalogService::embedded().context("bundled menu is invalid")?,
    };
    Ok(catalog.with_page_size(config.items_per_page))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logger)
    setup_environment().context("failed to initialize logging")?;

    tracing::info!("Kiosk edge starting...");

    // 2. Configuration
    let config = Config::from_env();
    tracing::info!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        policy = ?config.ambiguity_policy,
        "Configuration loaded"
    );

    // 3. Catalog
    let catalog = Arc::new(load_catalog(&config)?);

    // 4. Login state
    let store = FileFlagStore::open(&config.work_dir_path()).context("failed to open flag store")?;
    let verifier = OtpVerifier::new(config.otp_code.clone())?;
    let mut auth = AuthService::new(store, verifier);
    if auth.guard().is_err() {
        let masked = auth.request_otp(DEMO_MOBILE)?;
        tracing::info!(mobile = %masked, "Awaiting OTP");
        auth.verify_otp(&config.otp_code)?;
    }

    // 5. Cart with an event listener
    let mut cart = CartManager::with_policy(config.ambiguity_policy);
    cart.set_catalog(catalog.clone());

    let mut events = cart.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(
                    sequence = event.sequence,
                    event_type = %event.event_type,
                    "Cart event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event listener lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // 6. Scripted session
    let page = catalog.page(&CatalogQuery::category("biriyani").paginate(1, config.items_per_page));
    tracing::info!(
        total = page.total,
        shown = page.data.len(),
        pages = page.total_pages,
        "Browsing biriyani"
    );

    let steps = [
        cart.add_item(Selection::product(1).with_variant("full"), 1),
        cart.add_item(Selection::product(1).with_variant("jumbo").with_addons(["raita"]), 1),
        cart.add_item(Selection::product(10).with_addons(["mayo", "extra-cheese"]), 2),
        cart.update_qty(Selection::product(10).with_addons(["extra-cheese", "mayo"]), 1),
        cart.add_item(Selection::product(2), 1),
        cart.remove_item(Selection::product(2)),
        // Two biriyani lines and no base line
        cart.update_qty(Selection::product(1), 1),
    ];
    for response in &steps {
        if let Some(error) = &response.error {
            tracing::warn!(code = ?error.code, message = %error.message, "Cart command rejected");
        }
    }

    let bill = calculate_bill(cart.snapshot(), &*catalog, config.tax_percent);
    for line in &bill.lines {
        tracing::info!(
            title = %line.title,
            variant = ?line.variant_name,
            addons = ?line.addon_names,
            quantity = line.quantity,
            unit_price = %line.unit_price,
            line_total = %line.line_total,
            "Bill line"
        );
    }
    tracing::info!(
        total_qty = bill.total_qty,
        subtotal = bill.subtotal,
        tax = bill.tax,
        grand_total = bill.grand_total,
        "Bill"
    );

    drop(cart);
    listener.await.context("event listener panicked")?;

    tracing::info!("Kiosk edge stopped");
    Ok(())
}
