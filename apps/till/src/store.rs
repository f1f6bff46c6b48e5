//! # Store Screen
//!
//! One open order over a snapshot of the menu, driven by single-word
//! commands read from stdin.
//!
//! ## Session State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreSession                                                           │
//! │  ├── menu     Vec<MenuItem>   snapshot; replaced only by a good reload │
//! │  ├── order    Order           lines keep the price seen at first add   │
//! │  ├── cursor   Cursor          focus on the menu or the bill            │
//! │  ├── policy   PricingPolicy   discount, then GST                       │
//! │  └── layout   ReceiptLayout   header, footer, paper width              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! ```text
//! 1..9        quick-add menu item n       n / p      next / previous
//! enter       add focused menu item       + / -      focused bill line ±1
//! tab         switch menu ↔ bill          esc        clear focus
//! x           drop focused bill line      add <id>   add by menu item id
//! bill        preview the receipt         print      print and start over
//! reload      re-read the menu            paper small|large
//! menu        redraw the screen           quit
//! ```

use std::str::FromStr;

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use cafe_core::{
    BillSummary, CoreError, Cursor, Focus, ItemRef, Key, KeyOutcome, MenuItem, Order, OrderLine,
    PaperSize, PricingPolicy, ReceiptLayout,
};
use cafe_db::MenuRepository;

use crate::error::{AppError, AppResult};

// =============================================================================
// Commands
// =============================================================================

/// One line of store-screen input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    Key(Key),
    AddById(String),
    DropLine,
    ShowBill,
    Print,
    Reload,
    Paper(PaperSize),
    Redraw,
    Help,
    Quit,
}

impl FromStr for StoreCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().unwrap_or("").to_lowercase();
        let arg = words.next();

        let command = match (head.as_str(), arg) {
            (d, None) if d.len() == 1 && matches!(d.as_bytes()[0], b'1'..=b'9') => {
                StoreCommand::Key(Key::Digit(d.as_bytes()[0] - b'0'))
            }
            ("n" | "next" | "down" | "right", None) => StoreCommand::Key(Key::Next),
            ("p" | "prev" | "up" | "left", None) => StoreCommand::Key(Key::Prev),
            ("enter", None) => StoreCommand::Key(Key::Enter),
            ("+" | "=", None) => StoreCommand::Key(Key::Increase),
            ("-" | "_", None) => StoreCommand::Key(Key::Decrease),
            ("tab", None) => StoreCommand::Key(Key::Tab),
            ("esc" | "escape", None) => StoreCommand::Key(Key::Escape),
            ("add", Some(id)) => StoreCommand::AddById(id.to_string()),
            ("x", None) => StoreCommand::DropLine,
            ("bill", None) => StoreCommand::ShowBill,
            ("print", None) => StoreCommand::Print,
            ("reload", None) => StoreCommand::Reload,
            ("paper", Some(size)) => StoreCommand::Paper(size.parse().map_err(AppError::validation)?),
            ("menu" | "", None) => StoreCommand::Redraw,
            ("help" | "?", None) => StoreCommand::Help,
            ("quit" | "q" | "exit", None) => StoreCommand::Quit,
            _ => return Err(AppError::unknown_command(s.trim())),
        };

        Ok(command)
    }
}

// =============================================================================
// Session
// =============================================================================

/// The store screen's state for one till session.
#[derive(Debug)]
pub struct StoreSession {
    repo: MenuRepository,
    menu: Vec<MenuItem>,
    order: Order,
    cursor: Cursor,
    policy: PricingPolicy,
    layout: ReceiptLayout,
}

impl StoreSession {
    /// Loads the menu and starts with an empty order.
    pub async fn open(
        repo: MenuRepository,
        policy: PricingPolicy,
        layout: ReceiptLayout,
    ) -> AppResult<Self> {
        let menu = repo.list().await?;
        info!(items = menu.len(), "Store session opened");

        Ok(StoreSession {
            cursor: Cursor::start(menu.len()),
            repo,
            menu,
            order: Order::new(),
            policy,
            layout,
        })
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn focus(&self) -> Focus {
        self.cursor.focus()
    }

    pub fn layout(&self) -> &ReceiptLayout {
        &self.layout
    }

    /// Re-reads the menu. On failure the menu, order and cursor are untouched.
    pub async fn reload_menu(&mut self) -> AppResult<usize> {
        let menu = self.repo.list().await?;
        debug!(items = menu.len(), "Menu reloaded");

        self.menu = menu;
        self.cursor.settle(self.menu.len(), self.order.line_count());
        Ok(self.menu.len())
    }

    /// Handles a navigation key and applies what it asks for.
    pub fn press(&mut self, key: Key) -> KeyOutcome {
        let outcome = self
            .cursor
            .press(key, self.menu.len(), self.order.line_count());

        match outcome {
            KeyOutcome::AddMenuItem(index) => {
                if let Some(item) = self.menu.get(index) {
                    self.order.push_unit(ItemRef::Catalog(item));
                }
            }
            KeyOutcome::IncreaseLine(index) => {
                if let Some(line) = self.order.line(index).cloned() {
                    self.order.push_unit(ItemRef::Line(&line));
                }
            }
            KeyOutcome::DecreaseLine(index) => {
                if let Some(id) = self.order.line(index).map(|l| l.item_id.clone()) {
                    self.order.pop_unit(&id);
                }
            }
            KeyOutcome::Moved | KeyOutcome::Ignored => {}
        }

        self.cursor.settle(self.menu.len(), self.order.line_count());
        outcome
    }

    /// Adds one unit of the loaded menu item with this id.
    pub fn add_item_by_id(&mut self, id: &str) -> AppResult<()> {
        let item = self
            .menu
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))?;

        self.order.push_unit(ItemRef::Catalog(item));
        Ok(())
    }

    /// Removes the focused bill line whatever its quantity.
    pub fn drop_focused_line(&mut self) -> Option<OrderLine> {
        let Focus::Bill(index) = self.cursor.focus() else {
            return None;
        };
        let line = self.order.line(index).cloned()?;

        self.order = std::mem::take(&mut self.order).drop_line(&line.item_id);
        self.cursor.settle(self.menu.len(), self.order.line_count());
        Some(line)
    }

    /// Current totals.
    pub fn bill(&self) -> BillSummary {
        self.policy.price(self.order.subtotal())
    }

    /// Receipt for the open order, without closing it.
    pub fn preview(&self, date: NaiveDate) -> String {
        self.layout.render(&self.order, &self.bill(), date)
    }

    /// Renders the receipt and discards the order. `None` for an empty order.
    pub fn finalize(&mut self, date: NaiveDate) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }

        let bill = self.bill();
        let receipt = self.layout.render(&self.order, &bill, date);
        info!(
            lines = self.order.line_count(),
            units = self.order.total_quantity(),
            total = %bill.final_total,
            "Bill finalized"
        );

        self.order = Order::new();
        self.cursor.settle(self.menu.len(), 0);
        Some(receipt)
    }

    pub fn set_paper(&mut self, paper: PaperSize) {
        self.layout.paper = paper;
    }

    /// Menu, bill and running total, with `>` at the focused row.
    pub fn render_screen(&self) -> String {
        let label = self.layout.currency_label.as_str();
        let focus = self.cursor.focus();
        let mut out = Vec::new();

        out.push("MENU".to_string());
        if self.menu.is_empty() {
            out.push("  (no items)".to_string());
        }
        for (i, item) in self.menu.iter().enumerate() {
            let marker = if focus == Focus::Menu(i) { '>' } else { ' ' };
            out.push(format!(
                "{} {:>2}. {:<24} {:>12}",
                marker,
                i + 1,
                item.name,
                item.price().format_with(label)
            ));
        }

        out.push(String::new());
        out.push("BILL".to_string());
        if self.order.is_empty() {
            out.push("  (empty)".to_string());
        }
        for (i, line) in self.order.lines().iter().enumerate() {
            let marker = if focus == Focus::Bill(i) { '>' } else { ' ' };
            out.push(format!(
                "{} {:<24} x{:<3} {:>12}",
                marker,
                line.name,
                line.quantity,
                line.line_total().format_with(label)
            ));
        }

        let bill = self.bill();
        out.push(format!(
            "  Subtotal {}   Total {}",
            bill.subtotal.format_with(label),
            bill.final_total.format_with(label)
        ));

        out.join("\n")
    }
}

// =============================================================================
// Input Loop
// =============================================================================

const HELP: &str = "\
1..9 quick-add | n/p next/prev | enter add | +/- quantity | tab menu<->bill
esc clear focus | x drop line | add <id> | bill preview | print finalize
reload menu | paper small|large | menu redraw | quit";

/// Reads commands line by line until `quit` or end of input.
pub async fn run<R, W>(
    session: &mut StoreSession,
    mut input: R,
    mut out: W,
    date: NaiveDate,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    write_block(&mut out, &session.render_screen()).await?;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail to parse as a command.
        let line = String::from_utf8_lossy(&buf);
        let command = match line.parse::<StoreCommand>() {
            Ok(command) => command,
            Err(e) => {
                write_block(&mut out, &format!("error: {}", e)).await?;
                continue;
            }
        };

        let reply = match command {
            StoreCommand::Quit => break,
            StoreCommand::Key(key) => {
                session.press(key);
                session.render_screen()
            }
            StoreCommand::AddById(id) => match session.add_item_by_id(&id) {
                Ok(()) => session.render_screen(),
                Err(e) => format!("error: {}", e),
            },
            StoreCommand::DropLine => match session.drop_focused_line() {
                Some(line) => format!("Removed {}\n{}", line.name, session.render_screen()),
                None => "error: focus a bill line first (tab)".to_string(),
            },
            StoreCommand::ShowBill => session.preview(date),
            StoreCommand::Print => match session.finalize(date) {
                Some(receipt) => receipt,
                None => "error: the bill is empty".to_string(),
            },
            StoreCommand::Reload => match session.reload_menu().await {
                Ok(count) => format!("Menu reloaded ({} items)\n{}", count, session.render_screen()),
                Err(e) => {
                    warn!(error = %e, "Menu reload failed; keeping the current menu");
                    format!("error: {}", e)
                }
            },
            StoreCommand::Paper(paper) => {
                session.set_paper(paper);
                format!("Paper set to {}", paper)
            }
            StoreCommand::Redraw => session.render_screen(),
            StoreCommand::Help => HELP.to_string(),
        };

        write_block(&mut out, &reply).await?;
    }

    out.flush().await?;
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> AppResult<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n\n").await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminService;
    use crate::error::{ErrorCode, MENU_SERVICE_FAILED};
    use cafe_db::{Database, DbConfig};

    async fn seeded() -> (Database, StoreSession) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let admin = AdminService::new(db.menu_items());
        admin.add("Burger", "250").await.unwrap();
        admin.add("Soda", "60").await.unwrap();
        admin.add("Chai", "30").await.unwrap();

        let session = StoreSession::open(
            db.menu_items(),
            PricingPolicy::default(),
            ReceiptLayout::default(),
        )
        .await
        .unwrap();
        (db, session)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("3".parse::<StoreCommand>().unwrap(), StoreCommand::Key(Key::Digit(3)));
        assert_eq!(" N ".parse::<StoreCommand>().unwrap(), StoreCommand::Key(Key::Next));
        assert_eq!("+".parse::<StoreCommand>().unwrap(), StoreCommand::Key(Key::Increase));
        assert_eq!("esc".parse::<StoreCommand>().unwrap(), StoreCommand::Key(Key::Escape));
        assert_eq!(
            "paper small".parse::<StoreCommand>().unwrap(),
            StoreCommand::Paper(PaperSize::Small)
        );
        assert_eq!("".parse::<StoreCommand>().unwrap(), StoreCommand::Redraw);

        assert_eq!("0".parse::<StoreCommand>().unwrap_err().code, ErrorCode::UnknownCommand);
        assert_eq!("12".parse::<StoreCommand>().unwrap_err().code, ErrorCode::UnknownCommand);
        assert_eq!(
            "paper a4".parse::<StoreCommand>().unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[tokio::test]
    async fn test_quick_keys_build_the_bill() {
        let (_db, mut session) = seeded().await;

        session.press(Key::Digit(1));
        session.press(Key::Digit(2));
        session.press(Key::Digit(1));

        let bill = session.bill();
        assert_eq!(session.order().quantity_of(&session.menu()[0].id), 2);
        assert_eq!(bill.subtotal.cents(), 56000);
        assert_eq!(bill.amount_due().cents(), 52920);

        // Past the end of a three-item menu
        assert_eq!(session.press(Key::Digit(9)), KeyOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_bill_line_keys() {
        let (_db, mut session) = seeded().await;
        session.press(Key::Digit(1));
        session.press(Key::Digit(2));

        session.press(Key::Tab);
        assert_eq!(session.focus(), Focus::Bill(0));

        session.press(Key::Increase);
        assert_eq!(session.order().lines()[0].quantity, 2);

        session.press(Key::Next);
        session.press(Key::Decrease);
        assert_eq!(session.order().line_count(), 1);
        // Cursor pulled back onto the remaining line
        assert_eq!(session.focus(), Focus::Bill(0));

        session.press(Key::Decrease);
        session.press(Key::Decrease);
        assert!(session.order().is_empty());
        assert_eq!(session.focus(), Focus::Menu(0));
    }

    #[tokio::test]
    async fn test_drop_focused_line() {
        let (_db, mut session) = seeded().await;
        session.press(Key::Digit(1));
        session.press(Key::Digit(1));
        session.press(Key::Digit(3));

        assert!(session.drop_focused_line().is_none());

        session.press(Key::Tab);
        let dropped = session.drop_focused_line().unwrap();
        assert_eq!(dropped.name, "Burger");
        assert_eq!(dropped.quantity, 2);
        assert_eq!(session.order().line_count(), 1);
    }

    #[tokio::test]
    async fn test_add_by_id() {
        let (_db, mut session) = seeded().await;
        let soda_id = session.menu()[1].id.clone();

        session.add_item_by_id(&soda_id).unwrap();
        assert_eq!(session.order().quantity_of(&soda_id), 1);

        let err = session.add_item_by_id("missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_admin_edit_does_not_reprice_open_order() {
        let (db, mut session) = seeded().await;
        session.press(Key::Digit(1));

        let burger_id = session.menu()[0].id.clone();
        AdminService::new(db.menu_items())
            .edit(&burger_id, None, Some("300"))
            .await
            .unwrap();
        session.reload_menu().await.unwrap();
        assert_eq!(session.menu()[0].price_cents, 30000);

        // Existing line keeps its price; new units of it too
        session.press(Key::Digit(1));
        let line = &session.order().lines()[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price_cents, 25000);
    }

    #[tokio::test]
    async fn test_failed_reload_leaves_state_unchanged() {
        let (db, mut session) = seeded().await;
        session.press(Key::Digit(2));
        session.press(Key::Tab);

        let menu_before = session.menu().to_vec();
        let order_before = session.order().clone();
        let focus_before = session.focus();

        db.close().await;
        let err = session.reload_menu().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, MENU_SERVICE_FAILED);

        assert_eq!(session.menu(), menu_before.as_slice());
        assert_eq!(session.order(), &order_before);
        assert_eq!(session.focus(), focus_before);
    }

    #[tokio::test]
    async fn test_finalize_discards_order() {
        let (_db, mut session) = seeded().await;
        assert!(session.finalize(date()).is_none());

        session.press(Key::Digit(1));
        session.press(Key::Digit(2));
        session.press(Key::Digit(1));

        let receipt = session.finalize(date()).unwrap();
        assert!(receipt.contains("Rs.529.20"));
        assert!(session.order().is_empty());
    }

    #[tokio::test]
    async fn test_run_loop() {
        let (_db, mut session) = seeded().await;
        let input: &[u8] = b"1\n2\n1\nbogus\npaper small\nprint\nbill\nquit\n3\n";
        let mut output = Vec::new();

        run(&mut session, input, &mut output, date()).await.unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("error: Unknown command: bogus"));
        assert!(text.contains("Paper set to 58mm"));
        assert!(text.contains("Discount (10%):"));
        assert!(text.contains("Rs.529.20"));
        // Input after quit is not processed
        assert!(session.order().is_empty());
        for line in text.lines().filter(|l| l.starts_with('-') || l.starts_with('=')) {
            assert!(line.chars().count() <= 32);
        }
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8() {
        let (_db, mut session) = seeded().await;
        let input: &[u8] = b"1\n\xff\nbill\nprint\n";
        let mut output = Vec::new();

        run(&mut session, input, &mut output, date()).await.unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("error: Unknown command"));
        assert!(text.contains("Thank you for dining with us!"));
        assert!(text.contains("Rs.236.25"));
        assert!(session.order().is_empty());
    }

    #[tokio::test]
    async fn test_run_handles_crlf_and_missing_final_newline() {
        let (_db, mut session) = seeded().await;
        let input: &[u8] = b"1\r\n2\r\nprint";
        let mut output = Vec::new();

        run(&mut session, input, &mut output, date()).await.unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(!text.contains("error:"));
        assert!(session.order().is_empty());
    }
}
