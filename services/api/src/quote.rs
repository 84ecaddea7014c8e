use clap::{Args, ValueEnum};
use wiria_engage::error::AppError;
use wiria_engage::workflows::membership::{FeeDetail, MembershipType};

use crate::infra::default_fee_schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MembershipKind {
    Individual,
    Group,
}

impl From<MembershipKind> for MembershipType {
    fn from(kind: MembershipKind) -> Self {
        match kind {
            MembershipKind::Individual => MembershipType::Individual,
            MembershipKind::Group => MembershipType::Group,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Membership type to quote
    #[arg(long, value_enum)]
    pub(crate) membership_type: MembershipKind,
    /// Current number of members (groups only)
    #[arg(long, default_value_t = 1)]
    pub(crate) members: u32,
    /// Quote a renewal instead of a new registration
    #[arg(long, default_value_t = false)]
    pub(crate) renewal: bool,
    /// Member count on record from the previous renewal (groups only)
    #[arg(long, default_value_t = 0)]
    pub(crate) previous_max: u32,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    for line in quote_lines(&args) {
        println!("{line}");
    }
    Ok(())
}

fn fee_line(label: &str, detail: &FeeDetail) -> String {
    format!(
        "{label:<18} {count:>4} x KES {rate:>6} = KES {subtotal:>8}",
        label = label,
        count = detail.count,
        rate = detail.rate,
        subtotal = detail.subtotal,
    )
}

fn quote_lines(args: &QuoteArgs) -> Vec<String> {
    let schedule = default_fee_schedule();
    let membership_type = MembershipType::from(args.membership_type);

    if args.renewal {
        let quote = schedule.renewal_quote(membership_type, args.members, args.previous_max);
        vec![
            fee_line("Renewal", &quote.renewal),
            fee_line("New registration", &quote.new_registration),
            format!("{:<18} {:>26} KES {:>8}", "Total", "", quote.total),
        ]
    } else {
        let quote = schedule.registration_quote(membership_type, args.members);
        vec![
            fee_line("Registration", &quote.registration),
            fee_line("Subscription", &quote.subscription),
            format!("{:<18} {:>26} KES {:>8}", "Total", "", quote.total),
        ]
    }
}
