//! # Interactive Session
//!
//! Line-oriented cashier loop over any reader/writer pair.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add                 prompt for name, price, qty, discounts             │
//! │  tax <percent>       set tax rate                                       │
//! │  orderdisc <percent> set order percent discount                         │
//! │  orderfix <amount>   set order fixed discount                           │
//! │  show                list lines and totals                              │
//! │  remove <index>      drop line (0-based, non-negative)                  │
//! │  clear               empty cart and reset discounts                     │
//! │  checkout            take cash, save receipt                            │
//! │  help                list commands                                      │
//! │  quit | exit         leave                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing command prints `Error: ...` and the loop carries on. Every
//! edit is made on a draft copy of the register and only kept if the draft
//! still prices without leaving Money's range, so a bad command never
//! leaves the cart half-changed or unpriceable.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use till_core::{render_receipt, Money, NewLineItem, Percent, Register};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};
use crate::receipts::ReceiptStore;

pub const BANNER: &str = "Cash Register - Interactive Mode";
pub const HELP: &str =
    "Commands: add, tax <percent>, orderdisc <percent>, orderfix <amount>, show, remove <index>, clear, checkout, quit";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive register session.
pub struct Repl<R, W> {
    register: Register,
    store: ReceiptStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(register: Register, store: ReceiptStore, input: R, output: W) -> Self {
        Repl {
            register,
            store,
            input,
            output,
        }
    }

    /// Gives back the register and the output sink.
    pub fn into_parts(self) -> (Register, W) {
        (self.register, self.output)
    }

    /// Runs until `quit`/`exit` or end of input.
    ///
    /// ## Errors
    /// Only terminal I/O failures end the session with an error.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "{BANNER}")?;
        writeln!(
            self.output,
            "Type 'help' for commands. 'checkout' to finalize. 'quit' to exit."
        )?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            let command = line.trim().to_lowercase();
            debug!(%command, "Dispatching command");

            match self.dispatch(&command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(%command, error = %err, "Command failed");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: &str) -> CliResult<Flow> {
        let (verb, arg) = match command.split_once(' ') {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (command, None),
        };

        match (verb, arg) {
            ("quit" | "exit", None) => return Ok(Flow::Quit),
            ("help", None) => writeln!(self.output, "{HELP}")?,
            ("tax", Some(arg)) => {
                let percent: Percent = arg.parse()?;
                self.commit(|draft| draft.set_tax_rate(percent))?;
                writeln!(self.output, "Tax set to {percent}%")?;
            }
            ("orderdisc", Some(arg)) => {
                let percent: Percent = arg.parse()?;
                self.commit(|draft| draft.apply_order_percent_discount(percent))?;
                writeln!(self.output, "Order percent discount set to {percent}%")?;
            }
            ("orderfix", Some(arg)) => {
                let amount: Money = arg.parse()?;
                self.commit(|draft| draft.apply_order_fixed_discount(amount))?;
                writeln!(self.output, "Order fixed discount set to {amount}")?;
            }
            ("add", None) => {
                let item = self.read_new_item()?;
                self.commit(|draft| draft.add_item(item))?;
                writeln!(self.output, "Added.")?;
            }
            ("show", None) => self.show()?,
            ("remove", Some(arg)) => {
                let index: usize = arg
                    .parse()
                    .map_err(|_| CliError::InvalidIndex(arg.to_string()))?;
                let mut draft = self.register.clone();
                draft.remove_item(index)?;
                self.keep(draft)?;
                writeln!(self.output, "Removed.")?;
            }
            ("clear", None) => {
                self.register.clear_items();
                self.register.clear_discounts();
                writeln!(self.output, "Cleared cart and discounts.")?;
            }
            ("checkout", None) => self.checkout()?,
            _ => writeln!(self.output, "Unknown command. Type 'help'.")?,
        }
        Ok(Flow::Continue)
    }

    /// Applies `edit` to a draft and keeps the draft if it still prices.
    fn commit(&mut self, edit: impl FnOnce(&mut Register)) -> CliResult<()> {
        let mut draft = self.register.clone();
        edit(&mut draft);
        self.keep(draft)
    }

    fn keep(&mut self, draft: Register) -> CliResult<()> {
        draft.try_totals()?;
        self.register = draft;
        Ok(())
    }

    /// Prompts for every field before touching the register.
    fn read_new_item(&mut self) -> CliResult<NewLineItem> {
        let name = self.require("Item name: ")?;
        let price: Money = self.require("Unit price: ")?.parse()?;

        let qty_text = self.require("Quantity: ")?;
        let quantity: i64 = qty_text
            .parse()
            .map_err(|_| CliError::InvalidQuantity(qty_text.clone()))?;

        let pct_text = self.require("Line percent discount (0-100, optional): ")?;
        let percent = if pct_text.is_empty() {
            Percent::zero()
        } else {
            pct_text.parse()?
        };

        let fixed_text = self.require("Line fixed discount per unit (optional): ")?;
        let fixed = if fixed_text.is_empty() {
            None
        } else {
            Some(fixed_text.parse::<Money>()?)
        };

        Ok(NewLineItem::new(name, price)
            .quantity(quantity)
            .percent_discount(percent)
            .fixed_discount_per_unit(fixed))
    }

    fn show(&mut self) -> CliResult<()> {
        if self.register.is_empty() {
            writeln!(self.output, "Cart is empty.")?;
            return Ok(());
        }

        let totals = self.register.try_totals()?;
        for (idx, item) in self.register.line_items().iter().enumerate() {
            writeln!(
                self.output,
                "{}: {} x{} @ {} -> {}",
                idx,
                item.name,
                item.quantity,
                item.unit_price,
                item.total()
            )?;
        }

        writeln!(self.output, "Subtotal: {}", totals.subtotal_before_discounts)?;
        writeln!(self.output, "Line discounts: -{}", totals.line_discounts_total)?;
        writeln!(
            self.output,
            "After line discounts: {}",
            totals.subtotal_after_line_discounts
        )?;
        writeln!(self.output, "Order discount: -{}", totals.order_level_discount)?;
        writeln!(self.output, "Pre-tax: {}", totals.pre_tax_total)?;
        writeln!(self.output, "Tax ({}%): {}", totals.tax_rate, totals.tax_amount)?;
        writeln!(self.output, "Grand total: {}", totals.grand_total)?;
        Ok(())
    }

    fn checkout(&mut self) -> CliResult<()> {
        if self.register.is_empty() {
            writeln!(self.output, "Cart is empty.")?;
            return Ok(());
        }

        let cash: Money = self.require("Cash tendered: ")?.parse()?;
        let change = self.register.compute_change(cash)?;

        let now = Local::now().naive_local();
        let text = render_receipt(&self.register, cash, change, now);
        let path: PathBuf = self.store.save(&text, now)?;

        writeln!(self.output, "Saved receipt to: {}", path.display())?;
        Ok(())
    }

    /// Writes `label` and reads one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`prompt`](Self::prompt) but end of input is an error.
    fn require(&mut self, label: &str) -> CliResult<String> {
        self.prompt(label)?.ok_or(CliError::UnexpectedEof)
    }
}
