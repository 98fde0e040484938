//! Product command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tracing::debug;

use prodboard_core::{
    Controller, Product, ProductDraft, ProductId, SortDirection, SortKey, SortState, ViewQuery,
};

use crate::cli::{GlobalOpts, ListArgs, OutputFormat, ProductsArgs, ProductsCommand, SortColumn};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: i64,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Product>> for ProductRow {
    fn from(p: &Arc<Product>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            price: p.price,
            description: p.description.clone(),
        }
    }
}

fn detail(p: &Product) -> String {
    [
        format!("ID:          {}", p.id),
        format!("Name:        {}", p.name),
        format!("Price:       {}", p.price),
        format!(
            "Description: {}",
            if p.description.is_empty() {
                "-"
            } else {
                &p.description
            }
        ),
    ]
    .join("\n")
}

fn sort_key(column: SortColumn) -> SortKey {
    match column {
        SortColumn::Id => SortKey::Id,
        SortColumn::Name => SortKey::Name,
        SortColumn::Price => SortKey::Price,
    }
}

fn not_found(id: &str) -> CliError {
    CliError::NotFound {
        message: format!("No product with id '{id}'"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => list_products(controller, list, global).await,

        ProductsCommand::Create {
            name,
            price,
            description,
        } => {
            let product = controller
                .create(ProductDraft::new(name, price, description))
                .await?;
            let out = output::render_single(global.output, &product, detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Update {
            id,
            name,
            price,
            description,
        } => {
            controller.load().await?;
            let current = controller.find_product(&id).ok_or_else(|| not_found(&id))?;

            let mut draft = ProductDraft::from_product(&current);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(price) = price {
                draft.price = price;
            }
            if let Some(description) = description {
                draft.description = description;
            }

            let product = controller.update(current.id.clone(), draft).await?;
            let out = output::render_single(global.output, &product, detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Are you sure you want to delete product {id}? This action cannot be undone."),
                "products delete",
                global.yes,
            )? {
                return Ok(());
            }

            controller.load().await?;
            let target = if let Some(p) = controller.find_product(&id) {
                p.id.clone()
            } else {
                // Not in the listing; let the server have the final say.
                let Ok(parsed) = id.parse::<ProductId>();
                parsed
            };
            let removed = controller.delete(target).await?;
            debug!(removed, "product deleted");

            if !global.quiet && global.output == OutputFormat::Table {
                eprintln!("Deleted product {id}");
            }
            Ok(())
        }
    }
}

async fn list_products(
    controller: &Controller,
    list: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    controller.load().await?;
    let snap = controller.products_snapshot();

    let direction = if list.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let query = ViewQuery {
        sort: SortState::new(sort_key(list.sort), direction),
        search: list.search.unwrap_or_default(),
        page: usize::try_from(list.page).unwrap_or(usize::MAX),
        page_size: controller.config().page_size,
    };

    if list.all {
        let items = query.apply_unpaged(&snap);
        let out = output::render_list(global.output, &items, |p| ProductRow::from(p), |p| {
            p.id.to_string()
        });
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let view = query.apply(&snap);
    let out = output::render_list(global.output, &view.items, |p| ProductRow::from(p), |p| {
        p.id.to_string()
    });
    output::print_output(&out, global.quiet);

    if global.output == OutputFormat::Table {
        let footer = output::page_footer(
            view.page,
            view.page_count,
            view.matched,
            output::should_color(global.color),
        );
        output::print_output(&footer, global.quiet);
    }
    Ok(())
}
