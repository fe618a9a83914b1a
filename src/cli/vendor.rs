//! Vendor CLI commands

use clap::Subcommand;

use super::context::{confirm_delete, CliContext};
use crate::display::{format_vendor_directory, format_vendor_list, VENDORS_TITLE};
use crate::error::{PlannerError, PlannerResult};
use crate::models::Vendor;
use crate::services::{VendorForm, VendorService};
use crate::sync::Mirrored;

/// Vendor subcommands
#[derive(Subcommand)]
pub enum VendorCommands {
    /// Add a vendor or important contact
    Add {
        /// Category label
        category: String,
        /// Vendor name
        name: String,
        #[arg(long)]
        contact: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change fields of a vendor
    Edit {
        /// Vendor ID or a unique prefix of it
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a vendor
    Delete {
        /// Vendor ID or a unique prefix of it
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List vendors
    List {
        /// Group by category instead of one table
        #[arg(short, long)]
        grouped: bool,
    },
}

/// Handle a vendor command
pub fn handle_vendor_command(ctx: &mut CliContext, cmd: VendorCommands) -> PlannerResult<()> {
    match cmd {
        VendorCommands::Add {
            category,
            name,
            contact,
            phone,
            email,
            address,
            notes,
        } => {
            let form = VendorForm {
                category,
                name,
                contact_person: contact.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                email: email.unwrap_or_default(),
                address: address.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            let committed = VendorService::new(&ctx.app.session()).create(&form)?;
            ctx.commit(committed);
        }

        VendorCommands::Edit {
            id,
            category,
            name,
            contact,
            phone,
            email,
            address,
            notes,
        } => {
            let id = ctx.resolve_id::<Vendor>(&id)?;
            let vendor = Vendor::find(ctx.app.mirrors(), &id)
                .ok_or_else(|| PlannerError::vendor_not_found(id.as_str()))?;

            let current = VendorForm::from_vendor(&vendor);
            let form = VendorForm {
                category: category.unwrap_or(current.category),
                name: name.unwrap_or(current.name),
                contact_person: contact.unwrap_or(current.contact_person),
                phone: phone.unwrap_or(current.phone),
                email: email.unwrap_or(current.email),
                address: address.unwrap_or(current.address),
                notes: notes.unwrap_or(current.notes),
            };
            let committed = VendorService::new(&ctx.app.session()).update(&id, &form)?;
            ctx.commit(committed);
        }

        VendorCommands::Delete { id, yes } => {
            let id = ctx.resolve_id::<Vendor>(&id)?;
            let Some(confirmation) = confirm_delete::<Vendor>(yes) else {
                println!("Dibatalkan.");
                return Ok(());
            };
            let committed = VendorService::new(&ctx.app.session()).delete(&id, confirmation)?;
            ctx.commit(committed);
        }

        VendorCommands::List { grouped } => {
            println!("{}", VENDORS_TITLE);
            if grouped {
                println!("{}", format_vendor_directory(&ctx.app.directory()).trim_end());
            } else {
                println!("{}", format_vendor_list(&ctx.app.vendors()));
            }
            ctx.flush_notices();
        }
    }
    Ok(())
}
