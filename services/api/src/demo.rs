use crate::infra::InMemoryListingSink;
use clap::Args;
use saledirect::catalog::{
    sort, AustralianState, FilterSpec, PropertyRecord, PropertyType, SampleCatalog, SearchEngine,
    SortKey,
};
use saledirect::compliance::{commission_savings, compliance_alerts, StateCompliance};
use saledirect::error::AppError;
use saledirect::listing::{DraftField, ListingSink, ListingWizard, PriceType, WizardError};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PropertySearchArgs {
    /// Free-text query matched against titles, addresses, and suburbs
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Restrict results to one state or territory (e.g. NSW)
    #[arg(long)]
    pub(crate) state: Option<AustralianState>,
    /// Minimum asking price in whole AUD
    #[arg(long)]
    pub(crate) min_price: Option<u64>,
    /// Maximum asking price in whole AUD
    #[arg(long)]
    pub(crate) max_price: Option<u64>,
    /// Restrict results to one property type (house, apartment, ...)
    #[arg(long)]
    pub(crate) property_type: Option<PropertyType>,
    /// Minimum number of bedrooms
    #[arg(long)]
    pub(crate) min_bedrooms: Option<u32>,
    /// Result ordering: newest, price_asc, price_desc, or views_desc
    #[arg(long)]
    pub(crate) sort: Option<SortKey>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// State used for the filtered search and compliance portions
    #[arg(long)]
    pub(crate) state: Option<AustralianState>,
    /// Skip the listing wizard portion of the demo
    #[arg(long)]
    pub(crate) skip_wizard: bool,
}

pub(crate) async fn run_property_search(args: PropertySearchArgs) -> Result<(), AppError> {
    let PropertySearchArgs {
        query,
        state,
        min_price,
        max_price,
        property_type,
        min_bedrooms,
        sort: sort_key,
    } = args;

    let spec = FilterSpec {
        query,
        state,
        min_price,
        max_price,
        property_type,
        min_bedrooms,
    };

    let engine = SearchEngine::new(Arc::new(SampleCatalog::instant()));
    let reply = engine.search(&spec).await?;
    let results = match sort_key {
        Some(key) => sort(&reply.results, key),
        None => reply.results,
    };

    if results.is_empty() {
        println!("No properties matched the given filters.");
        return Ok(());
    }

    println!("{} matching propert{}:", results.len(), plural_y(results.len()));
    for record in &results {
        print_record(record);
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { state, skip_wizard } = args;
    let demo_state = state.unwrap_or(AustralianState::Qld);

    println!("SaleDirect marketplace demo");

    let engine = SearchEngine::new(Arc::new(SampleCatalog::instant()));

    let everything = engine.search(&FilterSpec::default()).await?;
    println!(
        "\nCatalog search: {} listings available across the country",
        everything.results.len()
    );

    // Two overlapping searches: the seller narrows the filter before the
    // first reply lands. Applying the newer reply first makes the older one
    // stale, exactly what the UI does with its request tokens.
    let broad = engine
        .search(&FilterSpec {
            min_price: Some(700_000),
            max_price: Some(900_000),
            ..FilterSpec::default()
        })
        .await?;
    let narrowed = engine
        .search(&FilterSpec {
            state: Some(demo_state),
            ..FilterSpec::default()
        })
        .await?;

    let applied = engine
        .apply(narrowed)
        .expect("newest reply always applies");
    println!(
        "\nFiltered search ({}): {} listing{}",
        demo_state.code(),
        applied.len(),
        plural_s(applied.len())
    );
    for record in &applied {
        print_record(record);
    }
    if engine.apply(broad).is_none() {
        println!("(an earlier in-flight search resolved late and was discarded as stale)");
    }

    if skip_wizard {
        return Ok(());
    }

    println!("\nListing wizard demo");
    let mut wizard = ListingWizard::new();

    // The enforced gate refuses to advance until the stage is complete.
    match wizard.next() {
        Err(WizardError::IncompleteStage { missing, .. }) => {
            println!(
                "- Advancing an empty stage is refused: missing {}",
                missing
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        other => {
            println!("- Unexpected gate result: {other:?}");
        }
    }

    wizard.apply(DraftField::Title("Charming Queenslander with Character".to_string()));
    wizard.apply(DraftField::PropertyType(PropertyType::House));
    wizard.apply(DraftField::Description(
        "Classic character home with polished timber floors and a wraparound verandah."
            .to_string(),
    ));
    wizard.next()?;
    println!("- Basic info complete, moved to step {}", wizard.stage().number());

    wizard.apply(DraftField::Bedrooms(3));
    wizard.apply(DraftField::Bathrooms(2.0));
    wizard.apply(DraftField::CarSpaces(1));
    wizard.apply(DraftField::LandSize(405));
    wizard.next()?;

    wizard.apply(DraftField::Street("78 Maple Street".to_string()));
    wizard.apply(DraftField::Suburb("Paddington".to_string()));
    wizard.apply(DraftField::State(demo_state));
    wizard.apply(DraftField::Postcode("4064".to_string()));
    wizard.apply(DraftField::Price(675_000));
    wizard.apply(DraftField::PriceType(PriceType::Negotiable));
    wizard.next()?;

    wizard.add_feature("Character Home");
    wizard.add_feature("Verandah");
    wizard.apply(DraftField::AddImage(
        "https://cdn.saledirect.example/photos/queenslander.jpg".to_string(),
    ));
    wizard.next()?;
    println!(
        "- Reached step {} ({})",
        wizard.stage().number(),
        wizard.stage().label()
    );

    wizard.apply(DraftField::BuildingInspectionDone(true));
    wizard.apply(DraftField::HasPool(false));

    let draft = wizard.submit()?;
    let alerts = compliance_alerts(&draft);
    let price = draft.price.expect("demo draft carries a price");
    let draft_state = draft.state.expect("demo draft carries a state");

    let sink = InMemoryListingSink::default();
    let receipt = sink.accept(draft)?;
    println!("- Submitted: listing {} accepted", receipt.listing_id);

    if alerts.is_empty() {
        println!("- No compliance items outstanding");
    } else {
        println!("- Compliance items still outstanding:");
        for alert in &alerts {
            println!("    - {}", alert.detail);
        }
    }

    let table = StateCompliance::for_state(draft_state);
    println!(
        "\nSelling privately in {} ({} business day cooling-off period)",
        draft_state.label(),
        table.cooling_off_days
    );
    println!(
        "- Typical agent commission: {:.1}%-{:.1}%",
        table.commission_rates.min, table.commission_rates.max
    );
    println!(
        "- Estimated commission saved on a ${} sale: ${}",
        format_aud(price),
        format_aud(commission_savings(price, draft_state))
    );

    Ok(())
}

fn print_record(record: &PropertyRecord) {
    println!(
        "- [{}] {} — ${}",
        record.id,
        record.title,
        format_aud(record.price)
    );
    println!(
        "    {} | {} | {} bed / {} bath / {} car | {} views",
        record.address,
        record.property_type.label(),
        record.bedrooms,
        record.bathrooms,
        record.car_spaces,
        record.views
    );
}

/// Group a whole-dollar amount with thousands separators.
fn format_aud(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
