#[cfg(test)]
mod tests {
    use crate::logic::{PaymentData, PaymentMethod};
    use crate::receipt::{receipt_file_name, render_receipt, write_receipt, ReceiptSettings};
    use chrono::{NaiveDate, TimeZone, Utc};
    use psiconnect_common::Slot;

    fn settings() -> ReceiptSettings {
        ReceiptSettings {
            currency_symbol: "R$".to_string(),
            unit_price: 150,
            time_zone: chrono_tz::America::Sao_Paulo,
        }
    }

    fn payment() -> PaymentData {
        PaymentData {
            method: PaymentMethod::Pix,
            amount: 300,
            sessions: vec![
                Slot::new(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(), "14:00"),
                Slot::new(NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(), "11:00"),
            ],
            order_id: "ORD-1707931800000".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 14, 17, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_receipt_layout() {
        let expected = "\
COMPROVANTE DE PAGAMENTO
========================

Número do Pedido: ORD-1707931800000
Data do Pagamento: quarta-feira, 14 de fevereiro de 2024
Horário: 14:30

SESSÕES AGENDADAS:

1. quinta-feira, 15 de fevereiro de 2024 às 14:00
   Valor: R$ 150,00

2. sexta-feira, 16 de fevereiro de 2024 às 11:00
   Valor: R$ 150,00


RESUMO DO PAGAMENTO:
Total de Sessões: 2
Valor Total: R$ 300,00
Forma de Pagamento: PIX

Status: PAGO ✓

Obrigado por escolher nossos serviços!";
        assert_eq!(render_receipt(&payment(), &settings()), expected);
    }

    #[test]
    fn test_receipt_single_session_spacing() {
        let mut single = payment();
        single.sessions.truncate(1);
        single.amount = 150;
        let text = render_receipt(&single, &settings());
        assert!(text.contains(
            "SESSÕES AGENDADAS:\n\n1. quinta-feira, 15 de fevereiro de 2024 às 14:00\n   Valor: R$ 150,00\n\n\nRESUMO DO PAGAMENTO:"
        ));
        assert!(text.contains("Forma de Pagamento: PIX\n\nStatus: PAGO ✓\n\nObrigado"));
    }

    #[test]
    fn test_receipt_uses_card_label() {
        let mut card = payment();
        card.method = PaymentMethod::Card;
        assert!(render_receipt(&card, &settings()).contains("Forma de Pagamento: Cartão de Crédito"));
    }

    #[test]
    fn test_write_receipt_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("receipts");
        let path = write_receipt(&target, &payment(), &settings()).unwrap();
        assert_eq!(path.file_name().unwrap(), "comprovante-ORD-1707931800000.txt");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("COMPROVANTE DE PAGAMENTO"));
        assert_eq!(receipt_file_name("ORD-1"), "comprovante-ORD-1.txt");
    }
}
