use std::io::{self, Write};

use alloy::eips::{BlockId, BlockNumberOrTag};

use crate::core_sdk::reasons::ReasonTable;
use crate::session::DebugOutcome;
use crate::swap_sdk::order::{Party, PartyRole, Signature};
use crate::validator_sdk::check::{CheckReport, Finding};

fn block_label(block: &BlockId) -> String {
    match block {
        BlockId::Hash(hash) => hash.block_hash.to_string(),
        BlockId::Number(BlockNumberOrTag::Number(n)) => n.to_string(),
        BlockId::Number(tag) => format!("{tag:?}").to_lowercase(),
    }
}

/// Renders a finished session as plain text.
#[derive(Debug, Clone, Default)]
pub struct ReportPrinter {
    pub verbose: bool,
    pub reasons: Option<ReasonTable>,
}

impl ReportPrinter {
    pub fn new(verbose: bool, reasons: Option<ReasonTable>) -> Self {
        Self { verbose, reasons }
    }

    pub fn write_report<W: Write>(&self, out: &mut W, outcome: &DebugOutcome) -> io::Result<()> {
        let decoded = &outcome.decoded;
        writeln!(out, "network: {}", outcome.network)?;
        if let Some(tx) = &outcome.transaction {
            writeln!(out, "transaction: {} ({} -> {})", tx.hash, tx.from, tx.to)?;
        }
        writeln!(
            out,
            "call: {}.{}",
            decoded.category,
            decoded.method.name()
        )?;
        if let Some(delegate) = decoded.delegate {
            writeln!(out, "delegate: {delegate}")?;
        }
        writeln!(out, "block: {}", block_label(&outcome.block))?;

        let order = &decoded.order;
        writeln!(out)?;
        writeln!(out, "order")?;
        writeln!(out, "  nonce:  {}", order.nonce)?;
        writeln!(out, "  expiry: {}", order.expiry)?;
        for (role, party) in order.parties() {
            self.write_party(out, role, party)?;
        }
        self.write_signature(out, &order.signature)?;
        if self.verbose {
            writeln!(out, "  hash:   {}", outcome.order_hash)?;
        }

        writeln!(out)?;
        writeln!(out, "checks")?;
        for report in &outcome.reports {
            self.write_check(out, report)?;
        }
        Ok(())
    }

    fn write_party<W: Write>(&self, out: &mut W, role: PartyRole, party: &Party) -> io::Result<()> {
        if role == PartyRole::Affiliate && party.is_empty() {
            return writeln!(out, "  {role}: none");
        }
        writeln!(out, "  {role}:")?;
        writeln!(out, "    kind:   {}", party.token_kind())?;
        writeln!(out, "    wallet: {}", party.wallet)?;
        writeln!(out, "    token:  {}", party.token)?;
        writeln!(out, "    amount: {}", party.amount)?;
        writeln!(out, "    id:     {}", party.id)
    }

    fn write_signature<W: Write>(&self, out: &mut W, signature: &Signature) -> io::Result<()> {
        writeln!(out, "  signature:")?;
        writeln!(out, "    signatory: {}", signature.signatory)?;
        writeln!(out, "    validator: {}", signature.validator)?;
        writeln!(out, "    version:   0x{}", hex::encode(signature.version))?;
        writeln!(out, "    v:         {}", signature.v)?;
        if self.verbose {
            writeln!(out, "    r:         0x{}", hex::encode(signature.r))?;
            writeln!(out, "    s:         0x{}", hex::encode(signature.s))?;
        }
        Ok(())
    }

    fn write_check<W: Write>(&self, out: &mut W, report: &CheckReport) -> io::Result<()> {
        if let Some(cause) = &report.skipped {
            return writeln!(out, "  [skip] {}: skipped: {cause}", report.check);
        }
        if report.findings.is_empty() {
            return writeln!(out, "  [ ok ] {}: passed", report.check);
        }
        writeln!(out, "  [fail] {}:", report.check)?;
        for finding in &report.findings {
            writeln!(out, "    - {}", self.describe(finding))?;
            if self.verbose {
                if let Some(shortfall) = finding.shortfall() {
                    writeln!(out, "      short by {shortfall}")?;
                }
            }
        }
        Ok(())
    }

    fn describe(&self, finding: &Finding) -> String {
        match finding {
            Finding::Validator(code) if code.is_empty() => "(blank reason code)".to_string(),
            Finding::Validator(code) => match self.reasons.as_ref().and_then(|r| r.lookup(code)) {
                Some(message) => format!("{code}: {message}"),
                None => code.clone(),
            },
            Finding::InsufficientBalance {
                required,
                available,
                ..
            }
            | Finding::InsufficientAllowance {
                required,
                available,
                ..
            } if self.verbose => format!("{finding} (need {required}, have {available})"),
            _ => finding.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256, U256};

    use super::*;
    use crate::core_sdk::network::Network;
    use crate::swap_sdk::decoder::fixtures::{sample_order, SIGNER_TOKEN, SIGNER_WALLET};
    use crate::swap_sdk::decoder::{ContractCategory, DecodedCall, SwapMethod};
    use crate::swap_sdk::domain::order_hash;
    use crate::swap_sdk::order::Order;
    use crate::validator_sdk::check::CheckKind;

    fn outcome(reports: Vec<CheckReport>) -> DebugOutcome {
        let order = Order::from(sample_order());
        DebugOutcome {
            network: Network::Rinkeby,
            transaction: None,
            order_hash: order_hash(&order),
            decoded: DecodedCall {
                method: SwapMethod::Swap,
                category: ContractCategory::Swap,
                order,
                delegate: None,
            },
            tx_sender: Address::ZERO,
            block: BlockId::latest(),
            reports,
        }
    }

    fn render(printer: &ReportPrinter, outcome: &DebugOutcome) -> String {
        let mut buf = Vec::new();
        printer.write_report(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn balance_finding() -> Finding {
        Finding::InsufficientBalance {
            role: PartyRole::Signer,
            owner: SIGNER_WALLET,
            token: SIGNER_TOKEN,
            required: U256::from(1000),
            available: U256::from(250),
        }
    }

    #[test]
    fn test_skip_is_distinct_from_pass() {
        let text = render(
            &ReportPrinter::default(),
            &outcome(vec![
                CheckReport::skipped(CheckKind::Nonce, "execution reverted"),
                CheckReport::completed(CheckKind::Expiry, vec![]),
            ]),
        );
        assert!(text.contains("nonce: skipped: execution reverted"));
        assert!(text.contains("[ ok ] expiry: passed"));
        assert!(text.contains("affiliate: none"));
        assert!(text.contains("block: latest"));
    }

    #[test]
    fn test_block_label() {
        assert_eq!(block_label(&BlockId::number(1234)), "1234");
        assert_eq!(block_label(&BlockId::pending()), "pending");
    }

    #[test]
    fn test_blank_reason_code_is_still_listed() {
        let report = CheckReport::completed(
            CheckKind::Expiry,
            vec![
                Finding::Validator("ORDER_EXPIRED".into()),
                Finding::Validator(String::new()),
            ],
        );
        let text = render(&ReportPrinter::default(), &outcome(vec![report]));
        assert!(text.contains("- ORDER_EXPIRED\n"));
        assert!(text.contains("- (blank reason code)\n"));
    }

    #[test]
    fn test_reason_codes_are_translated_when_known() {
        let reasons = ReasonTable::from_json_str(r#"{"ORDER_EXPIRED": "Order has expired"}"#).unwrap();
        let report = CheckReport::completed(
            CheckKind::Expiry,
            vec![
                Finding::Validator("ORDER_EXPIRED".into()),
                Finding::Validator("SOMETHING_NEW".into()),
            ],
        );
        let text = render(&ReportPrinter::new(false, Some(reasons)), &outcome(vec![report.clone()]));
        assert!(text.contains("- ORDER_EXPIRED: Order has expired"));
        assert!(text.contains("- SOMETHING_NEW\n"));

        let raw = render(&ReportPrinter::default(), &outcome(vec![report]));
        assert!(raw.contains("- ORDER_EXPIRED\n"));
    }

    #[test]
    fn test_verbose_adds_raw_values_and_shortfall() {
        let report = CheckReport::completed(CheckKind::Funds(PartyRole::Signer), vec![balance_finding()]);
        let out = outcome(vec![report]);

        let quiet = render(&ReportPrinter::default(), &out);
        assert!(!quiet.contains("short by"));
        assert!(!quiet.contains(&hex::encode(B256::repeat_byte(0x0a))));

        let loud = render(&ReportPrinter::new(true, None), &out);
        assert!(loud.contains("short by 750"));
        assert!(loud.contains("(need 1000, have 250)"));
        assert!(loud.contains(&format!("r:         0x{}", hex::encode(B256::repeat_byte(0x0a)))));
        assert!(loud.contains(&format!("hash:   {}", out.order_hash)));
    }
}
