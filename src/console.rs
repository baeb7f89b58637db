//! Interactive menu loop.
//!
//! All raw input is read and parsed here; the workflow only ever sees
//! typed commands. Recoverable errors are printed and the current screen
//! re-prompts.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};

use crate::application::checkout::{Checkout, CheckoutState, Command, ConfirmReply, Event};
use crate::application::history::OrderHistory;
use crate::db::DbPool;
use crate::domain::basket::LineItem;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderStore, ProductCatalog};
use crate::infrastructure::order_repo::DieselOrderStore;
use crate::infrastructure::product_repo::DieselProductCatalog;

const DIVIDER: &str = "---------------------------------------------";

/// What a menu interaction produced.
enum MenuAction {
    /// A command for the workflow.
    Dispatch(Command),
    /// Input was rejected and already reported; show the screen again.
    Nothing,
    /// Leave the checkout session and return to the main menu.
    ExitToMain,
}

/// Top-level menu. Loops until the user chooses to exit.
pub fn run(pool: DbPool) -> Result<()> {
    loop {
        println!("\nWelcome to the Place Order App");
        let choice = Select::new()
            .with_prompt("Please choose an option")
            .items(&["Place an order", "Order history", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => place_order(&pool)?,
            1 => order_history(&pool)?,
            _ => {
                println!("Exiting the application...");
                return Ok(());
            }
        }
    }
}

/// One checkout session, driven to completion or abandoned.
fn place_order(pool: &DbPool) -> Result<()> {
    let mut checkout = Checkout::new(
        DieselProductCatalog::new(pool.clone()),
        DieselOrderStore::new(pool.clone()),
    );

    loop {
        let action = match checkout.state() {
            CheckoutState::Browsing => browse_menu(&checkout)?,
            CheckoutState::ReviewingBasket => basket_menu(&checkout)?,
            CheckoutState::ReviewingSummary => summary_menu(&checkout)?,
            CheckoutState::ConfirmingOrder => confirm_prompt()?,
            CheckoutState::Completed => return Ok(()),
        };

        match action {
            MenuAction::Dispatch(command) => match checkout.handle(command) {
                Ok(event) => report(&event),
                Err(err) => report_error(&err),
            },
            MenuAction::Nothing => {}
            MenuAction::ExitToMain => return Ok(()),
        }
    }
}

fn browse_menu<C: ProductCatalog, S: OrderStore>(checkout: &Checkout<C, S>) -> Result<MenuAction> {
    println!("\nPlace Order:");
    for product in checkout.products()? {
        println!("{}. {} | Price: {} PLN", product.id, product.name, product.price);
    }
    println!("{DIVIDER}");

    let choice = Select::new()
        .with_prompt("Options")
        .items(&[
            "Back to main menu",
            "Add product to basket",
            "View basket",
        ])
        .default(1)
        .interact()?;

    Ok(match choice {
        0 => MenuAction::ExitToMain,
        1 => prompt_add_item()?,
        _ => MenuAction::Dispatch(Command::OpenBasket),
    })
}

fn basket_menu<C: ProductCatalog, S: OrderStore>(checkout: &Checkout<C, S>) -> Result<MenuAction> {
    println!("\nBasket Summary:");
    let basket = checkout.basket();

    if basket.is_empty() {
        println!("Your basket is empty.");
        return Ok(MenuAction::Dispatch(Command::BackToBrowsing));
    }

    for (i, item) in basket.items().iter().enumerate() {
        println!("{}. {}", i + 1, format_line(item));
    }
    println!("{DIVIDER}\nTotal Cost: {} PLN", basket.total());

    let choice = Select::new()
        .with_prompt("Options")
        .items(&[
            "Back to place order menu",
            "Add product to basket",
            "Modify item quantity",
            "Remove item from basket",
            "View order summary",
        ])
        .default(4)
        .interact()?;

    Ok(match choice {
        0 => MenuAction::Dispatch(Command::BackToBrowsing),
        1 => prompt_add_item()?,
        2 => prompt_set_quantity()?,
        3 => prompt_remove_item()?,
        _ => MenuAction::Dispatch(Command::OpenSummary),
    })
}

fn summary_menu<C: ProductCatalog, S: OrderStore>(checkout: &Checkout<C, S>) -> Result<MenuAction> {
    println!("\nOrder Summary:");
    for item in checkout.basket().items() {
        println!("{}", format_line(item));
    }

    let quote = checkout.summary();
    println!("{DIVIDER}");
    println!("Subtotal: {} PLN", quote.subtotal);
    println!("Discount: -{} PLN", quote.discount);
    println!("Total cost: {} PLN", quote.total);

    let choice = Select::new()
        .with_prompt("Options")
        .items(&["Back to basket summary", "Place order"])
        .default(1)
        .interact()?;

    Ok(MenuAction::Dispatch(match choice {
        0 => Command::BackToBasket,
        _ => Command::PlaceOrder,
    }))
}

fn confirm_prompt() -> Result<MenuAction> {
    let answer: String = Input::new()
        .with_prompt("Are you sure you want to place the order? (yes/no)")
        .interact_text()?;

    match answer.parse::<ConfirmReply>() {
        Ok(reply) => Ok(MenuAction::Dispatch(Command::Confirm(reply))),
        Err(err) => {
            report_error(&err);
            Ok(MenuAction::Nothing)
        }
    }
}

fn prompt_add_item() -> Result<MenuAction> {
    let Some(product_id) = prompt_number::<i32>("Enter product ID")? else {
        return Ok(MenuAction::Nothing);
    };
    let Some(quantity) = prompt_number::<i32>("Enter the quantity")? else {
        return Ok(MenuAction::Nothing);
    };
    Ok(MenuAction::Dispatch(Command::AddItem {
        product_id,
        quantity,
    }))
}

fn prompt_set_quantity() -> Result<MenuAction> {
    let Some(item) = prompt_number::<usize>("Enter the item number to modify quantity")? else {
        return Ok(MenuAction::Nothing);
    };
    let Some(quantity) = prompt_number::<i32>("Enter the new quantity")? else {
        return Ok(MenuAction::Nothing);
    };
    Ok(MenuAction::Dispatch(Command::SetQuantity { item, quantity }))
}

fn prompt_remove_item() -> Result<MenuAction> {
    let Some(item) = prompt_number::<usize>("Enter the item number to remove")? else {
        return Ok(MenuAction::Nothing);
    };
    Ok(MenuAction::Dispatch(Command::RemoveItem { item }))
}

/// Prompt for a number; a parse failure is reported as invalid input and
/// returns `None` so the caller re-shows its menu.
fn prompt_number<T: std::str::FromStr>(prompt: &str) -> Result<Option<T>> {
    let raw: String = Input::new().with_prompt(prompt).interact_text()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            report_error(&DomainError::InvalidInput(raw));
            Ok(None)
        }
    }
}

/// Order history: list confirmed orders and drill into their details.
fn order_history(pool: &DbPool) -> Result<()> {
    let history = OrderHistory::new(DieselOrderStore::new(pool.clone()));

    loop {
        println!("\nOrder History:");
        let orders = history.all()?;

        if orders.is_empty() {
            println!("No orders found.");
            return Ok(());
        }

        for (i, order) in orders.iter().enumerate() {
            println!(
                "{}. Order Date: {} | Total: {} PLN | Items: {}",
                i + 1,
                order.order_date.format("%d %b %Y %H:%M"),
                order.total,
                order.item_count()
            );
        }
        println!("{DIVIDER}");

        let choice = Select::new()
            .with_prompt("Options")
            .items(&["Back to main menu", "View order details"])
            .default(0)
            .interact()?;

        match choice {
            0 => return Ok(()),
            _ => {
                let Some(number) =
                    prompt_number::<usize>("Enter the order number to view details")?
                else {
                    continue;
                };
                match number.checked_sub(1).and_then(|i| orders.get(i)) {
                    Some(order) => view_order_details(order),
                    None => report_error(&DomainError::InvalidInput(number.to_string())),
                }
            }
        }
    }
}

fn view_order_details(order: &Order) {
    println!(
        "\nOrder Details\nOrder Date: {}\n{DIVIDER}",
        order.order_date.format("%d %b %Y %H:%M")
    );
    for item in &order.items {
        println!("{}", format_line(item));
    }
    println!("{DIVIDER}\nSubtotal: {} PLN", order.subtotal);
    println!("Discount: -{} PLN", order.discount());
    println!("Total: {} PLN", order.total);
}

fn format_line(item: &LineItem) -> String {
    format!(
        "{} | Quantity: {} | Price: {} PLN | Subtotal: {} PLN",
        item.product_name,
        item.quantity,
        item.unit_price,
        item.line_total()
    )
}

fn report(event: &Event) {
    match event {
        Event::ItemAdded {
            product_name,
            quantity,
        } => println!(
            "{} Added {} x {} to the basket.",
            style("✓").green(),
            quantity,
            product_name
        ),
        Event::QuantityMerged {
            product_name,
            quantity,
        } => println!(
            "{} Updated {} quantity to {}.",
            style("✓").green(),
            product_name,
            quantity
        ),
        Event::QuantityChanged { .. } => println!("Item quantity updated successfully."),
        Event::ItemRemoved { .. } => println!("Item removed successfully."),
        Event::Moved => {}
        Event::ConfirmationDeclined => {
            println!("Order placement canceled. Returning to order summary...");
        }
        Event::OrderPlaced(order) => {
            println!("{} Order placed successfully!", style("✓").green());
            println!(
                "Thank you for your purchase. Your order number is {}.",
                order.id
            );
        }
    }
}

fn report_error(err: &DomainError) {
    println!("{} {}", style("✗").red(), err);
}
