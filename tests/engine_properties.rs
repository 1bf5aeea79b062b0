// tests/engine_properties.rs
use chrono::{TimeZone, Utc};
use news_insight_engine::analyze::topic::economy_priority;
use news_insight_engine::analyze::{classify, AnalyzerParams};
use news_insight_engine::insight::{Direction, EconomyIssueType, ImpactLevel, ItChangeType};
use news_insight_engine::{Article, Domain, DomainAnalyzer, InsightAnalyzer, InsightData, Priority};

fn art(i: usize, title: &str, content: &str, source: &str) -> Article {
    Article::new(title, format!("https://news.example/{i}"))
        .with_content(content)
        .with_source(source)
}

#[test]
fn batches_under_five_yield_nothing() {
    for n in 0..5 {
        let batch: Vec<Article> = (0..n)
            .map(|i| art(i, "환율 급등 금리 인상 코스피 상승", "", "연합"))
            .collect();
        assert!(DomainAnalyzer::economy().analyze(&batch).is_empty());
        assert!(DomainAnalyzer::it().analyze(&batch).is_empty());
    }
}

#[test]
fn list_caps_hold() {
    let content = "미국 금리 연준 Fed 중동 지정학 경상수지 무역수지 중국 경기 \
                   수입 물가 수출 기업 외화 부채 해외여행 인플레이션";
    let batch: Vec<Article> = (0..8).map(|i| art(i, "환율 상승", content, "연합")).collect();
    let out = DomainAnalyzer::economy().analyze(&batch);
    let fx = out
        .iter()
        .find_map(|i| i.economy().filter(|d| d.issue_type == EconomyIssueType::ExchangeRate))
        .expect("exchange rate insight");

    assert_eq!(fx.causes.len(), 5);
    assert!(fx.causes[0].starts_with("미국 금리 "));
    assert!(fx.causes[4].starts_with("지정학 "));
    assert_eq!(fx.effects.len(), 5);
    for i in &out {
        assert!(i.source_urls.len() <= 3);
        assert!(i.tags.len() <= 5);
    }
}

#[test]
fn direction_examples() {
    assert_eq!(classify(10, 3, 1.5), Direction::Up);
    assert_eq!(classify(6, 5, 1.5), Direction::Neutral);
}

#[test]
fn priority_examples() {
    let p = AnalyzerParams::default();
    assert_eq!(economy_priority(10, Direction::Up, &p), Priority::High);
    assert_eq!(economy_priority(6, Direction::Neutral, &p), Priority::Medium);
    assert_eq!(economy_priority(2, Direction::Up, &p), Priority::Low);
}

#[test]
fn exchange_rate_scenario() {
    let batch = vec![
        art(0, "환율 상승 마감", "달러 강세", "연합뉴스"),
        art(1, "환율 상승 압력", "", "한국경제"),
        art(2, "원·달러 환율 상승", "", "연합뉴스"),
        art(3, "환율 상승 전망", "", "매일경제"),
        art(4, "환율 하락 반전 가능성", "", "한국경제"),
        art(5, "환율 관망세", "", "조선일보"),
    ];
    let out = DomainAnalyzer::economy().analyze(&batch);
    let fx = out
        .iter()
        .find(|i| matches!(&i.data, InsightData::Economy(d) if d.issue_type == EconomyIssueType::ExchangeRate))
        .expect("exchange rate insight");

    let data = fx.economy().unwrap();
    assert_eq!(data.direction, Direction::Up);
    assert!(fx.title.starts_with("📌 환율 상승세"));
    assert!(fx.title.ends_with(" [연합뉴스·한국경제·매일경제 등 6건]"));
    assert_eq!(
        fx.source_urls,
        vec![
            "https://news.example/0",
            "https://news.example/1",
            "https://news.example/2"
        ]
    );
    assert_eq!(data.event, "환율 상승 마감");
    assert!(fx.easy_explanation.as_deref().unwrap().starts_with("💡 쉽게 이해하기\n\n"));
}

#[test]
fn security_scenario_in_a_five_article_batch() {
    let batch = vec![
        art(0, "랜섬웨어 공격 확산", "기업 보안 비상", "보안뉴스"),
        art(1, "보안 업계 랜섬웨어 경고", "", "지디넷"),
        art(2, "랜섬웨어 피해 보안 점검", "", "보안뉴스"),
        art(3, "신형 스마트폰", "", "전자신문"),
        art(4, "날씨", "", "기타뉴스"),
    ];
    let out = DomainAnalyzer::it().analyze(&batch);
    let sec = out
        .iter()
        .find(|i| i.it().is_some_and(|d| d.change_type == ItChangeType::Security))
        .expect("security insight");
    let data = sec.it().unwrap();
    assert_eq!(data.impact.level, ImpactLevel::Critical);
    assert_eq!(sec.priority, Priority::High);
    assert!(sec.tags.contains(&"긴급".to_string()));
    assert!(sec
        .easy_explanation
        .as_deref()
        .unwrap()
        .contains("랜섬웨어는 컴퓨터의 파일을"));
}

#[test]
fn repeated_runs_are_identical() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let batch: Vec<Article> = (0..7)
        .map(|i| art(i, "AI 도입 확대 발표", "개발자 생산성 혁신", "IT조선"))
        .collect();
    let analyzer = DomainAnalyzer::it();
    let a = analyzer.analyze_at(&batch, now);
    let b = analyzer.analyze_at(&batch, now);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn parallel_analysis_matches_sequential() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let batch: Vec<Article> = (0..6)
        .map(|i| art(i, "금리 인상 속 코스피 하락", "외국인 매도", "연합"))
        .collect();
    let economy = DomainAnalyzer::economy();
    let expected = economy.analyze_at(&batch, now);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| economy.analyze_at(&batch, now)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn tech_change_tie_prefers_adoption() {
    let batch = vec![
        art(0, "클라우드 도입", "", "a"),
        art(1, "AI 채택", "", "b"),
        art(2, "구형 API 폐기", "", "c"),
        art(3, "서비스 종료", "", "d"),
        art(4, "무관한 기사", "", "e"),
    ];
    let out = DomainAnalyzer::it().analyze(&batch);
    let tech = out
        .iter()
        .filter_map(|i| i.it())
        .find(|d| matches!(d.change_type, ItChangeType::TechAdoption | ItChangeType::TechDeprecation))
        .expect("tech change insight");
    assert_eq!(tech.change_type, ItChangeType::TechAdoption);
}

#[test]
fn equity_down_scenario() {
    let batch = vec![
        art(0, "코스피 2,450 하락 마감", "외국인 매도", "연합뉴스"),
        art(1, "코스닥 약세", "", "연합뉴스"),
        art(2, "증시 급락", "", "한국경제"),
        art(3, "주가 하락 지속", "", "연합뉴스"),
        art(4, "코스피 하락세", "", "한국경제"),
        art(5, "주가 부진", "", "매일경제"),
    ];
    let out = DomainAnalyzer::economy().analyze(&batch);
    assert_eq!(out.len(), 1);
    let eq = &out[0];
    let data = eq.economy().unwrap();
    assert_eq!(data.issue_type, EconomyIssueType::EquityMarket);
    assert_eq!(data.direction, Direction::Down);
    assert_eq!(eq.priority, Priority::Medium);
    assert_eq!(
        eq.title,
        "📌 증시 하락세, 코스피 2,450 [연합뉴스·한국경제·매일경제 등 6건]"
    );
    assert!(eq.summary.contains("하락세"));
    let explanation = eq.easy_explanation.as_deref().unwrap();
    assert!(explanation.contains("주식시장이 하락하고 있습니다. 외국인 투자자들의 순매도 등이 하락의"));
    assert!(!explanation.contains("금리 상승 우려나"));
}

#[test]
fn deprecation_wins_when_strictly_ahead() {
    let batch = vec![
        art(0, "구형 API 지원 종료", "", "a"),
        art(1, "서비스 종료 예정", "", "b"),
        art(2, "라이브러리 deprecated", "", "c"),
        art(3, "클라우드 도입", "", "d"),
        art(4, "날씨", "", "e"),
    ];
    let out = DomainAnalyzer::it().analyze(&batch);
    let insight = out
        .iter()
        .find(|i| {
            i.it().is_some_and(|d| {
                matches!(d.change_type, ItChangeType::TechAdoption | ItChangeType::TechDeprecation)
            })
        })
        .expect("tech change insight");
    assert_eq!(insight.it().unwrap().change_type, ItChangeType::TechDeprecation);
    assert!(insight.summary.starts_with("기술 폐기 관련 3개 뉴스"));
    assert!(insight
        .easy_explanation
        .as_deref()
        .unwrap()
        .contains("단종되거나 지원이 중단됩니다"));
    assert_eq!(
        insight.source_urls,
        vec![
            "https://news.example/0",
            "https://news.example/1",
            "https://news.example/2"
        ]
    );
}

#[test]
fn every_insight_belongs_to_its_analyzer_domain() {
    let batch: Vec<Article> = (0..10)
        .map(|i| art(i, "환율 금리 코스피 출시 보안 도입", "상승", "연합"))
        .collect();
    for domain in Domain::ALL {
        for i in DomainAnalyzer::new(domain).analyze(&batch) {
            assert_eq!(i.domain, domain);
            assert_eq!(i.data.domain(), domain);
        }
    }
}
