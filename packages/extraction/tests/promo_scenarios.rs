//! End-to-end scenarios over real-shaped promo messages.

use std::sync::Arc;

use async_trait::async_trait;
use promo_extraction::{
    ExtractionError, ExtractionRequest, ExtractionResult, Extractor, HeuristicExtractor,
    Orchestrator,
};

fn request(text: &str) -> ExtractionRequest {
    ExtractionRequest {
        text: text.to_string(),
        chat: "hardmob_promos".to_string(),
        message_id: 12345,
        links: vec!["https://tidd.ly/47WTzXC".to_string()],
    }
}

fn run(text: &str) -> ExtractionResult {
    HeuristicExtractor::new().run(&request(text))
}

#[test]
fn nike_promo_coupon_price_and_product() {
    let result = run(
        "CUPOM NIKE AINDA ATIVO\n\n👟 Tênis Nike Air Max Nuaxis\n\n🔥 DE 549 | POR 287\n🎟 CUPOM: NIKE40\n🔗 https://tidd.ly/47WTzXC",
    );

    let codes: Vec<&str> = result.coupons.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["NIKE40"], "brand word must not be read as a code");
    assert_eq!(result.price, Some(28700));
    assert!(result.product.as_deref().unwrap().contains("Tênis"));
}

#[test]
fn multiple_coupons_in_detection_order() {
    let result = run(
        "Ali Magalu - Galaxy S25 5G 256GB\n\nR$ 3.447,76 - 12x sem juros\n\ncupom: HARDMOB8 / PROMOBR08\nhttps://s.click.aliexpress.com/e/_c3y5otih",
    );

    let codes: Vec<&str> = result.coupons.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["HARDMOB8", "PROMOBR08"]);
    assert_eq!(result.price, Some(344776));
}

#[test]
fn mercado_livre_coupon_with_discount() {
    let result = run(
        "Mercado Livre\n15% OFF\n* Em todos os produtos\n* Limite de R$60\n\ncupom: CUPOMNOMELI\nhttps://mercadolivre.com/sec/1caqtpF",
    );

    assert_eq!(result.coupons.len(), 1);
    assert_eq!(result.coupons[0].code, "CUPOMNOMELI");
    assert_eq!(result.coupons[0].discount.as_deref(), Some("15% OFF"));
    assert_eq!(result.store.as_deref(), Some("Mercado Livre"));
}

#[test]
fn cupom_word_without_code_detects_nothing() {
    let result = run(
        "🔥 332° - Cupom Mercado Livre 15% limitado em R$60\n🎫 Cupom\n🏪 Mercado Livre\n💬 11 Comentários\n\n➡️ https://promo.ninja/dRzRe",
    );
    assert!(result.coupons.is_empty());
}

#[test]
fn no_price_or_coupon_yields_empty_record() {
    let result = run("Nova promoção chegando em breve!\nFique ligado no canal.");
    assert!(result.price.is_none());
    assert!(result.coupons.is_empty());
}

#[test]
fn same_code_via_both_passes_appears_once() {
    let result = run("cupom: VGA11\n🎫 VGA11\nPlaca de vídeo barata");
    assert_eq!(result.coupons.len(), 1);
    assert_eq!(result.coupons[0].code, "VGA11");
}

#[test]
fn por_price_beats_discount_amount() {
    let result = run("👟 Tênis bom\n🔥 DE 549 | POR 287\n🎟 cupom de R$ 80 OFF");
    assert_eq!(result.price, Some(28700));
}

#[test]
fn footer_latch_is_monotonic() {
    let result = run(
        "Produto decente por 99,90\n💰Entre no nosso grupo de ofertas:\nhttps://t.me/ofertas\nlinha que parece conteúdo\noutra linha",
    );
    assert_eq!(result.text, "Produto decente por 99,90");
}

#[test]
fn pipeline_never_fails_on_odd_inputs() {
    for text in ["", " ", "\n\n\n", "🎫", "R$", "cupom:", "por ", "💰"] {
        let result = HeuristicExtractor::new().run(&ExtractionRequest {
            text: text.to_string(),
            chat: "c".into(),
            message_id: 1,
            links: vec![],
        });
        assert!(result.coupons.is_empty());
    }
}

struct AlwaysFails;

#[async_trait]
impl Extractor for AlwaysFails {
    fn name(&self) -> &str {
        "abacus"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn extract(
        &self,
        _request: &ExtractionRequest,
    ) -> promo_extraction::Result<ExtractionResult> {
        Err(ExtractionError::Api {
            status: 500,
            message: "upstream down".into(),
        })
    }
}

#[tokio::test]
async fn orchestrator_masks_remote_failure_with_regex_result() {
    let orchestrator = Orchestrator::new(Some(Arc::new(AlwaysFails)));
    let result = orchestrator
        .extract(&request(
            "👟 Tênis Nike Air Max Nuaxis\n🔥 DE 549 | POR 287\n🎟 CUPOM: NIKE40",
        ))
        .await;

    assert_eq!(result.price, Some(28700));
    assert_eq!(result.coupons[0].code, "NIKE40");
    assert!(result.category.is_none(), "regex strategy never sets category");
}
