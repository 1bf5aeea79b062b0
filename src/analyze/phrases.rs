//! Phrase banks for summaries and "쉽게 이해하기" explanations.
//!
//! Both generators are lookups over ordered `(predicate, phrase)` tables:
//! - summary themes: every theme whose predicate holds, first two kept;
//! - explanations: the first entry of the `(topic kind, direction)` bank whose
//!   predicate holds, rendered from segments that may be gated by further
//!   substring checks.
//!
//! All predicates are case-sensitive substring checks over the relevant corpus.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyze::keywords::Cond;
use crate::insight::{Direction, EconomyIssueType, ImpactLevel, ItChangeType};

pub const EXPLANATION_HEADER: &str = "💡 쉽게 이해하기\n\n";

/* ----------------------------
Summary themes
---------------------------- */

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub when: Cond,
    pub phrase: &'static str,
}

const fn theme(words: &'static [&'static str], phrase: &'static str) -> Theme {
    Theme {
        when: Cond::Any(words),
        phrase,
    }
}

pub static ECONOMY_THEMES: &[Theme] = &[
    theme(&["미국", "연준", "Fed"], "미국 통화정책"),
    theme(&["중국", "경기"], "글로벌 경기"),
    theme(&["물가", "인플레이션"], "물가 상황"),
    theme(&["실적", "기업"], "기업 실적"),
];

pub static IT_THEMES: &[Theme] = &[
    theme(&["AI"], "AI"),
    theme(&["GPT"], "GPT"),
    theme(&["ChatGPT"], "ChatGPT"),
    theme(&["Claude"], "Claude"),
    theme(&["GitHub"], "GitHub"),
    theme(&["Copilot"], "Copilot"),
    theme(&["React"], "React"),
    theme(&["TypeScript"], "TypeScript"),
    theme(&["JavaScript"], "JavaScript"),
    theme(&["Python"], "Python"),
    theme(&["AWS"], "AWS"),
    theme(&["Azure"], "Azure"),
    theme(&["Docker"], "Docker"),
    theme(&["Kubernetes"], "Kubernetes"),
];

/// Phrases of matching themes, in bank order, at most `limit`.
pub fn pick_themes(bank: &[Theme], text: &str, limit: usize) -> Vec<&'static str> {
    bank.iter()
        .filter(|t| t.when.holds(text))
        .take(limit)
        .map(|t| t.phrase)
        .collect()
}

fn direction_phrase(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "상승세를 보이고",
        Direction::Down => "하락세를 보이고",
        Direction::Neutral => "변동성을 보이고",
    }
}

pub fn economy_summary(topic: &str, count: usize, direction: Direction, text: &str) -> String {
    let themes = pick_themes(ECONOMY_THEMES, text, 2);
    let cause = if themes.is_empty() {
        "다양한 요인으로".to_string()
    } else {
        format!("{} 등의 영향으로", themes.join(", "))
    };
    format!(
        "{topic} 관련 {count}개 뉴스가 보도되었습니다. {cause} {topic}이(가) {} 있으며, \
         이는 국내 경제와 투자자들에게 중요한 영향을 미칠 것으로 분석됩니다.",
        direction_phrase(direction)
    )
}

pub fn it_summary(topic: &str, count: usize, impact: ImpactLevel, text: &str) -> String {
    let themes = pick_themes(IT_THEMES, text, 2);
    let mention = if themes.is_empty() {
        "IT 업계에서".to_string()
    } else {
        format!("{} 등의 기술과 관련하여", themes.join(", "))
    };
    let weight = if impact.is_major() {
        "개발자와 기업들이 주목해야 할 중요한 변화"
    } else {
        "관심을 가질 만한 흥미로운 변화"
    };
    format!(
        "{topic} 관련 {count}개 뉴스가 보도되었습니다. {mention} {weight}가 나타나고 있으며, \
         이는 개발 트렌드와 업무 방식에 영향을 미칠 것으로 보입니다."
    )
}

/* ----------------------------
Explanation banks
---------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Segment {
    Text(&'static str),
    If(Cond, &'static str),
    IfElse(Cond, &'static str, &'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Explanation {
    pub when: Cond,
    pub segments: &'static [Segment],
}

use Segment::{If, IfElse, Text};

const fn always(segments: &'static [Segment]) -> Explanation {
    Explanation {
        when: Cond::Always,
        segments,
    }
}

static EXCHANGE_UP: &[Explanation] = &[always(&[
    Text("달러 환율이 오른다는 것은 우리나라 돈의 가치가 떨어진다는 뜻입니다. "),
    If(Cond::Any(&["수입"]), "수입 제품 가격이 오르고 해외여행 비용이 늘어나지만, "),
    Text("수출 기업들은 해외에서 번 돈을 원화로 바꿀 때 더 많은 돈을 받게 되어 유리합니다. "),
    IfElse(
        Cond::Any(&["금리"]),
        "주로 미국의 금리가 오르면서 투자자들이 달러를 더 선호하게 되었기 때문입니다.",
        "다양한 대외 경제 요인들이 복합적으로 작용한 결과입니다.",
    ),
])];

static EXCHANGE_DOWN: &[Explanation] = &[always(&[
    Text(
        "달러 환율이 내린다는 것은 우리나라 돈의 가치가 올랐다는 뜻입니다. \
         해외여행이나 수입 제품을 구매할 때 유리해지지만, \
         수출 기업들은 해외에서 번 돈을 원화로 바꿀 때 받는 금액이 줄어들어 불리합니다. ",
    ),
    IfElse(
        Cond::Any(&["무역"]),
        "우리나라의 무역 흑자가 늘어나거나 외국인 투자가 증가하면서 원화 수요가 늘어난 것이 주요 원인입니다.",
        "국내외 경제 여건이 개선되면서 나타난 현상입니다.",
    ),
])];

static EXCHANGE_NEUTRAL: &[Explanation] = &[always(&[Text(
    "환율이 불안정하게 움직이고 있습니다. \
     기업들은 환율 변동으로 인한 손실을 대비하기 위한 환헤지 비용이 늘어날 수 있으며, \
     개인 투자자들도 외화 자산 투자 시 더 신중해야 할 시기입니다.",
)])];

static RATE_UP: &[Explanation] = &[always(&[
    Text(
        "금리가 오른다는 것은 돈을 빌리는 비용이 늘어난다는 의미입니다. \
         주택담보대출이나 신용대출의 이자가 늘어나 가계 부담이 커지지만, \
         반대로 예금이나 적금에 넣어둔 돈은 더 많은 이자를 받을 수 있습니다. ",
    ),
    IfElse(
        Cond::Any(&["인플레이션", "물가"]),
        "주로 물가 상승을 잡기 위해 중앙은행이 금리를 올리는 경우가 많습니다.",
        "경제 상황을 안정시키기 위한 통화정책의 일환입니다.",
    ),
    Text(" 주식시장에는 부정적 영향을 미칠 수 있어 투자자들의 주의가 필요합니다."),
])];

static RATE_DOWN: &[Explanation] = &[always(&[
    Text(
        "금리가 내린다는 것은 돈을 빌리는 비용이 줄어든다는 의미입니다. \
         대출 이자 부담이 줄어 소비와 투자가 활성화될 수 있지만, 예금과 적금의 이자 수익은 감소합니다. ",
    ),
    IfElse(
        Cond::Any(&["경기"]),
        "경기 침체를 막고 경제를 활성화하기 위해 금리를 내리는 경우가 많습니다.",
        "경제 여건 변화에 따른 통화정책 조정입니다.",
    ),
    Text(" 부동산과 주식 같은 자산 시장에는 긍정적 영향을 줄 수 있습니다."),
])];

static RATE_NEUTRAL: &[Explanation] = &[always(&[Text(
    "금리 정책이 불확실한 상황입니다. \
     중앙은행이 경기와 물가 상황을 지켜보며 신중하게 정책을 결정하고 있는 시기로, \
     대출이나 투자 계획이 있다면 금리 동향을 계속 주시해야 합니다.",
)])];

static EQUITY_UP: &[Explanation] = &[
    Explanation {
        when: Cond::All(&[Cond::Any(&["코스피", "KOSPI"]), Cond::Any(&["코스닥", "KOSDAQ"])]),
        segments: &[
            Text("주식시장이 전반적으로 상승세를 보이고 있습니다. "),
            If(
                Cond::Any(&["대형주", "삼성"]),
                "대형주를 중심으로 상승세가 나타나고 있으며, \
                 이는 기관과 외국인 투자자들의 매수세가 강하기 때문입니다. ",
            ),
            If(
                Cond::Any(&["중소형주"]),
                "중소형주도 함께 오르면서 시장 전체의 분위기가 좋아지고 있습니다. ",
            ),
            Text("다만, 급격한 상승 이후에는 조정이 올 수 있으니 단기 투자자들은 주의가 필요합니다."),
        ],
    },
    always(&[
        Text("주식시장이 상승하고 있습니다. "),
        If(Cond::Any(&["실적"]), "기업들의 실적 개선 기대감과 "),
        IfElse(
            Cond::Any(&["외국인"]),
            "외국인 투자자들의 순매수가 ",
            "긍정적인 투자 심리가 ",
        ),
        Text(
            "시장 상승을 이끌고 있습니다. 보유 주식의 가치가 오르는 것은 좋지만, \
             고점에서 투자하는 것은 위험할 수 있으니 신중한 판단이 필요합니다.",
        ),
    ]),
];

static EQUITY_DOWN: &[Explanation] = &[always(&[
    Text("주식시장이 하락하고 있습니다. "),
    If(Cond::Any(&["금리"]), "금리 상승 우려나 "),
    If(Cond::Any(&["실적"]), "기업 실적 부진, "),
    IfElse(
        Cond::Any(&["외국인"]),
        "외국인 투자자들의 순매도 등이 ",
        "부정적인 투자 심리가 ",
    ),
    Text(
        "하락의 주요 원인입니다. 공포에 휩싸여 패닉 매도를 하기보다는, \
         보유 종목의 펀더멘털을 다시 점검하고 장기 투자 관점에서 접근하는 것이 현명합니다. \
         우량주가 함께 빠진다면 오히려 매수 기회가 될 수도 있습니다.",
    ),
])];

static EQUITY_NEUTRAL: &[Explanation] = &[always(&[Text(
    "주식시장이 방향성 없이 등락을 거듭하고 있습니다. \
     투자자들이 향후 경제 상황을 예측하기 어려워 관망세를 보이는 시기입니다. \
     이런 때는 무리한 단기 매매보다는 우량주를 중심으로 분할 매수하며 장기 투자 전략을 유지하는 것이 안전합니다.",
)])];

static ECONOMY_DEFAULT: &[Explanation] = &[always(&[Text(
    "현재 경제 상황을 종합적으로 분석해보면, 다양한 국내외 요인들이 복합적으로 작용하고 있습니다. \
     투자자와 소비자 모두 신중한 의사결정이 필요한 시기입니다.",
)])];

static PRODUCT_RELEASE: &[Explanation] = &[
    Explanation {
        when: Cond::All(&[
            Cond::Any(&["AI", "GPT", "ChatGPT", "Claude"]),
            Cond::Any(&["GitHub", "Copilot", "개발"]),
        ]),
        segments: &[Text(
            "AI 기반 개발 도구가 새롭게 출시되었습니다. 이런 도구들은 개발자가 코드를 작성할 때 \
             자동으로 다음에 올 코드를 제안하거나, 버그를 찾아주거나, 문서를 자동으로 작성해주는 등 \
             실제 업무에서 많은 시간을 절약해줍니다.\n\n\
             개발자 입장에서는 반복적이고 단순한 작업은 AI에게 맡기고, \
             더 창의적이고 복잡한 문제 해결에 집중할 수 있게 됩니다. \
             다만 AI가 제안한 코드를 맹목적으로 신뢰하기보다는, 검토하고 이해하는 과정이 여전히 중요합니다.",
        )],
    },
    Explanation {
        when: Cond::Any(&["AWS", "Azure", "GCP", "클라우드"]),
        segments: &[Text(
            "클라우드 서비스에 새로운 기능이 추가되었습니다. \
             클라우드는 쉽게 말해 '인터넷으로 빌려쓰는 컴퓨터'인데, \
             서버를 직접 구매하고 관리하는 대신 필요할 때만 빌려서 쓰고 사용한 만큼만 비용을 내면 됩니다.\n\n\
             새로운 기능이 추가되면 개발자들은 더 적은 코드로 더 많은 일을 할 수 있게 되어 개발 기간이 단축되고, \
             기업 입장에서는 인프라 관리 비용을 절감하면서 서비스 품질은 향상시킬 수 있습니다.",
        )],
    },
    always(&[Text(
        "새로운 제품이나 서비스가 출시되었습니다. \
         IT 제품이 업그레이드되면 일반적으로 더 빠르고, 더 편리하고, 더 안전해집니다.\n\n\
         개발자들은 새로운 기능을 배우는 데 시간을 투자해야 하지만, 장기적으로는 생산성이 향상됩니다. \
         기업 입장에서는 도입 비용과 효과를 비교해보고, \
         기존 시스템과의 호환성을 검토한 후 단계적으로 적용하는 것이 좋습니다.",
    )]),
];

static TECH_ADOPTION: &[Explanation] = &[
    Explanation {
        when: Cond::Any(&["AI", "머신러닝", "딥러닝"]),
        segments: &[Text(
            "AI 기술을 도입하는 기업들이 늘어나고 있습니다. \
             AI는 더 이상 먼 미래의 기술이 아니라, 실제 업무에서 활용되는 현실이 되었습니다.\n\n\
             예를 들어, 고객 문의를 자동으로 분류하고 답변하거나, 데이터 패턴을 분석해서 미래를 예측하거나, \
             사진에서 특정 물체를 자동으로 찾아내는 등의 일을 AI가 처리합니다. \
             개발자는 이런 AI 기술을 이해하고 활용할 수 있는 능력이 점점 더 중요해지고 있습니다.",
        )],
    },
    Explanation {
        when: Cond::Any(&["TypeScript", "Rust", "Go", "Python"]),
        segments: &[Text(
            "새로운 프로그래밍 언어나 프레임워크가 주목받고 있습니다. \
             프로그래밍 언어는 개발자가 컴퓨터에게 명령을 내리는 방법인데, \
             새로운 언어들은 보통 더 안전하고, 더 빠르고, 더 쓰기 편한 것이 특징입니다.\n\n\
             기존 언어에서 자주 발생하는 버그나 보안 문제를 근본적으로 방지하거나, \
             복잡한 코드를 간결하게 작성할 수 있게 해줍니다. \
             다만 새로운 기술을 배우는 데 시간이 들기 때문에, 프로젝트 상황에 맞춰 신중하게 도입을 결정해야 합니다.",
        )],
    },
    always(&[Text(
        "새로운 기술이나 방법론을 도입하는 추세가 나타나고 있습니다. \
         기술은 계속 발전하기 때문에, 개발자와 기업은 새로운 트렌드를 이해하고 \
         필요하다면 적극적으로 배워나가야 경쟁력을 유지할 수 있습니다.\n\n\
         무조건 새로운 것을 따라가기보다는, 우리 팀의 상황과 프로젝트의 특성에 맞는지 검토하고, \
         작은 규모로 먼저 시도해본 후 점진적으로 확대하는 것이 안전한 접근 방식입니다.",
    )]),
];

static TECH_DEPRECATION: &[Explanation] = &[always(&[Text(
    "기존에 사용하던 기술이나 서비스가 단종되거나 지원이 중단됩니다. \
     이는 해당 기술을 사용하는 개발자와 기업에게는 중대한 이슈입니다.\n\n\
     지원이 끊긴 기술을 계속 사용하면 보안 취약점이 발견되어도 패치가 제공되지 않아 위험하고, \
     새로운 시스템과 호환되지 않는 문제도 생깁니다. \
     따라서 대체 기술을 찾아 마이그레이션(이전) 계획을 수립해야 합니다.\n\n\
     마이그레이션은 시간과 비용이 드는 작업이지만, 미리 준비하면 서비스 중단 없이 안전하게 전환할 수 있습니다. \
     가능하면 지원 종료 최소 6개월 전부터 준비하는 것이 좋습니다.",
)])];

static SECURITY: &[Explanation] = &[always(&[
    Text(
        "보안 취약점이나 해킹 사고가 발생했습니다. 보안은 IT에서 가장 중요한 요소 중 하나인데, \
         한 번의 보안 사고로 개인정보가 유출되거나 서비스가 마비될 수 있기 때문입니다.\n\n",
    ),
    If(
        Cond::Any(&["랜섬웨어"]),
        "랜섬웨어는 컴퓨터의 파일을 암호화해서 인질로 잡고 돈을 요구하는 악성 프로그램입니다. ",
    ),
    If(
        Cond::Any(&["취약점"]),
        "소프트웨어의 취약점은 해커가 침입할 수 있는 보안 구멍인데, 발견되면 즉시 패치(수정)를 적용해야 합니다. ",
    ),
    Text(
        "\n\n개발자는 보안 코딩 원칙을 지키고, 정기적으로 보안 점검을 하며, 사용자 데이터를 안전하게 다뤄야 합니다. \
         기업은 보안 교육을 강화하고, 백업을 정기적으로 하며, 보안 사고 대응 절차를 마련해두어야 합니다.",
    ),
])];

static IT_DEFAULT: &[Explanation] = &[always(&[Text(
    "IT 업계에 의미 있는 변화가 나타나고 있습니다. \
     기술은 빠르게 발전하기 때문에, 개발자와 기업 모두 지속적으로 학습하고 적응해나가는 것이 중요합니다. \
     새로운 기술이 나왔다고 무조건 도입하기보다는, \
     우리에게 정말 필요한지, 비용 대비 효과가 있는지 신중하게 판단해야 합니다.",
)])];

pub fn economy_bank(issue: EconomyIssueType, direction: Direction) -> &'static [Explanation] {
    use Direction::*;
    use EconomyIssueType::*;
    match (issue, direction) {
        (ExchangeRate, Up) => EXCHANGE_UP,
        (ExchangeRate, Down) => EXCHANGE_DOWN,
        (ExchangeRate, Neutral) => EXCHANGE_NEUTRAL,
        (InterestRate, Up) => RATE_UP,
        (InterestRate, Down) => RATE_DOWN,
        (InterestRate, Neutral) => RATE_NEUTRAL,
        (EquityMarket, Up) => EQUITY_UP,
        (EquityMarket, Down) => EQUITY_DOWN,
        (EquityMarket, Neutral) => EQUITY_NEUTRAL,
        _ => ECONOMY_DEFAULT,
    }
}

/// IT paragraphs depend on the change type only; impact already shows in the summary.
pub fn it_bank(change: ItChangeType) -> &'static [Explanation] {
    match change {
        ItChangeType::ProductRelease => PRODUCT_RELEASE,
        ItChangeType::TechAdoption => TECH_ADOPTION,
        ItChangeType::TechDeprecation => TECH_DEPRECATION,
        ItChangeType::Security => SECURITY,
        _ => IT_DEFAULT,
    }
}

static RE_TRAILING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\n").expect("trailing whitespace regex"));
static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// Render the first applicable explanation of `bank` for `text`, with header.
pub fn explain(bank: &[Explanation], text: &str) -> String {
    let mut body = String::new();
    if let Some(entry) = bank.iter().find(|e| e.when.holds(text)) {
        for seg in entry.segments {
            match seg {
                Segment::Text(s) => body.push_str(s),
                Segment::If(cond, s) => {
                    if cond.holds(text) {
                        body.push_str(s);
                    }
                }
                Segment::IfElse(cond, yes, no) => {
                    body.push_str(if cond.holds(text) { yes } else { no });
                }
            }
        }
    }
    // gated clauses can leave dangling spaces or an empty paragraph
    let body = RE_TRAILING_WS.replace_all(&body, "\n");
    let body = RE_BLANK_RUN.replace_all(&body, "\n\n");
    format!("{EXPLANATION_HEADER}{}", body.trim())
}

pub fn economy_explanation(issue: EconomyIssueType, direction: Direction, text: &str) -> String {
    explain(economy_bank(issue, direction), text)
}

pub fn it_explanation(change: ItChangeType, text: &str) -> String {
    explain(it_bank(change), text)
}
