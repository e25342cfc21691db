use super::answers::Answer;
use super::domain::AnalysisVariant;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use Answer::{N, NA, NI, PN, PY, SN, SY, WN, WY, Y};

/// The six bias domains of the instrument, in assessment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasDomain {
    Confounding,
    InterventionClassification,
    Selection,
    MissingData,
    OutcomeMeasurement,
    SelectiveReporting,
}

impl BiasDomain {
    pub const fn ordered() -> [BiasDomain; 6] {
        [
            BiasDomain::Confounding,
            BiasDomain::InterventionClassification,
            BiasDomain::Selection,
            BiasDomain::MissingData,
            BiasDomain::OutcomeMeasurement,
            BiasDomain::SelectiveReporting,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            BiasDomain::Confounding => 1,
            BiasDomain::InterventionClassification => 2,
            BiasDomain::Selection => 3,
            BiasDomain::MissingData => 4,
            BiasDomain::OutcomeMeasurement => 5,
            BiasDomain::SelectiveReporting => 6,
        }
    }

    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            BiasDomain::Confounding => "Viés devido a confusão",
            BiasDomain::InterventionClassification => "Viés na classificação das intervenções",
            BiasDomain::Selection => "Viés de seleção dos participantes",
            BiasDomain::MissingData => "Viés devido a dados faltantes",
            BiasDomain::OutcomeMeasurement => "Viés na medição do desfecho",
            BiasDomain::SelectiveReporting => "Viés na seleção do resultado relatado",
        }
    }
}

impl fmt::Display for BiasDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.number())
    }
}

/// Signalling questions, addressed by their dotted instrument code ("1.1").
///
/// Declaration order is instrument order; every dependency points at an
/// earlier question, which the answer-sheet importer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionId {
    D1Q1,
    D1Q2,
    D1Q3,
    D1Q4,
    D1Q5,
    D2Q1,
    D2Q2,
    D2Q3,
    D2Q4,
    D2Q5,
    D3Q1,
    D3Q2,
    D3Q3,
    D3Q4,
    D3Q5,
    D3Q6,
    D3Q7,
    D3Q8,
    D4Q1,
    D4Q2,
    D4Q3,
    D4Q4,
    D4Q5,
    D4Q6,
    D4Q7,
    D4Q8,
    D4Q9,
    D4Q10,
    D4Q11,
    D5Q1,
    D5Q2,
    D5Q3,
    D6Q1,
    D6Q2,
    D6Q3,
    D6Q4,
}

impl QuestionId {
    pub const fn ordered() -> [QuestionId; 36] {
        use QuestionId::*;
        [
            D1Q1, D1Q2, D1Q3, D1Q4, D1Q5, D2Q1, D2Q2, D2Q3, D2Q4, D2Q5, D3Q1, D3Q2, D3Q3, D3Q4,
            D3Q5, D3Q6, D3Q7, D3Q8, D4Q1, D4Q2, D4Q3, D4Q4, D4Q5, D4Q6, D4Q7, D4Q8, D4Q9, D4Q10,
            D4Q11, D5Q1, D5Q2, D5Q3, D6Q1, D6Q2, D6Q3, D6Q4,
        ]
    }

    pub const fn domain(self) -> BiasDomain {
        use QuestionId::*;
        match self {
            D1Q1 | D1Q2 | D1Q3 | D1Q4 | D1Q5 => BiasDomain::Confounding,
            D2Q1 | D2Q2 | D2Q3 | D2Q4 | D2Q5 => BiasDomain::InterventionClassification,
            D3Q1 | D3Q2 | D3Q3 | D3Q4 | D3Q5 | D3Q6 | D3Q7 | D3Q8 => BiasDomain::Selection,
            D4Q1 | D4Q2 | D4Q3 | D4Q4 | D4Q5 | D4Q6 | D4Q7 | D4Q8 | D4Q9 | D4Q10 | D4Q11 => {
                BiasDomain::MissingData
            }
            D5Q1 | D5Q2 | D5Q3 => BiasDomain::OutcomeMeasurement,
            D6Q1 | D6Q2 | D6Q3 | D6Q4 => BiasDomain::SelectiveReporting,
        }
    }

    pub const fn code(self) -> &'static str {
        use QuestionId::*;
        match self {
            D1Q1 => "1.1",
            D1Q2 => "1.2",
            D1Q3 => "1.3",
            D1Q4 => "1.4",
            D1Q5 => "1.5",
            D2Q1 => "2.1",
            D2Q2 => "2.2",
            D2Q3 => "2.3",
            D2Q4 => "2.4",
            D2Q5 => "2.5",
            D3Q1 => "3.1",
            D3Q2 => "3.2",
            D3Q3 => "3.3",
            D3Q4 => "3.4",
            D3Q5 => "3.5",
            D3Q6 => "3.6",
            D3Q7 => "3.7",
            D3Q8 => "3.8",
            D4Q1 => "4.1",
            D4Q2 => "4.2",
            D4Q3 => "4.3",
            D4Q4 => "4.4",
            D4Q5 => "4.5",
            D4Q6 => "4.6",
            D4Q7 => "4.7",
            D4Q8 => "4.8",
            D4Q9 => "4.9",
            D4Q10 => "4.10",
            D4Q11 => "4.11",
            D5Q1 => "5.1",
            D5Q2 => "5.2",
            D5Q3 => "5.3",
            D6Q1 => "6.1",
            D6Q2 => "6.2",
            D6Q3 => "6.3",
            D6Q4 => "6.4",
        }
    }

    pub fn from_code(code: &str) -> Option<QuestionId> {
        QuestionId::ordered()
            .into_iter()
            .find(|question| question.code() == code.trim())
    }

    /// Codes a respondent may select for this question. Domain 1 wording and
    /// options depend on the analysis variant of the study context.
    pub fn allowed(self, variant: AnalysisVariant) -> &'static [Answer] {
        use QuestionId::*;
        match (self, variant) {
            (D1Q1, AnalysisVariant::IntentionToTreat) => &[Y, PY, WN, SN, NI],
            (D1Q2, AnalysisVariant::IntentionToTreat) => &[Y, PY, WN, SN, NI, NA],
            (D1Q3, AnalysisVariant::IntentionToTreat) => &[Y, PY, N, PN, NI, NA],
            (D1Q4, AnalysisVariant::IntentionToTreat) => &[Y, PY, N, PN, NA],
            (D1Q1, AnalysisVariant::PerProtocol) => &[Y, PY, PN, N, NI],
            (D1Q2, AnalysisVariant::PerProtocol) => &[NA, Y, PY, WN, SN, NI],
            (D1Q3, AnalysisVariant::PerProtocol) => &[NA, Y, PY, WN, SN, NI],
            (D1Q4, AnalysisVariant::PerProtocol) => &[NA, Y, PY, PN, N, NI],
            (D1Q5, _) => &[Y, PY, PN, N],
            (D2Q1, _) => &[Y, PY, PN, N, NI],
            (D2Q2, _) => &[NA, Y, PY, PN, N, NI],
            (D2Q3, _) => &[NA, SY, WY, PN, N, NI],
            (D2Q4, _) => &[SY, WY, PN, N, NI],
            (D2Q5, _) => &[Y, PY, PN, N, NI],
            (D3Q1, _) => &[Y, PY, WN, SN, NI],
            (D3Q2 | D3Q3, _) => &[Y, PY, PN, N, NI],
            (D3Q4 | D3Q5 | D3Q6 | D3Q7 | D3Q8, _) => &[NA, Y, PY, PN, N, NI],
            (D4Q1 | D4Q2 | D4Q3, _) => &[Y, PY, PN, N, NI],
            (D4Q4 | D4Q5 | D4Q7 | D4Q8 | D4Q11, _) => &[NA, Y, PY, PN, N, NI],
            (D4Q6 | D4Q9 | D4Q10, _) => &[NA, Y, PY, WN, SN, NI],
            (D5Q1 | D5Q2, _) => &[Y, PY, PN, N, NI],
            (D5Q3, _) => &[NA, SY, WY, PN, N, NI],
            (D6Q1 | D6Q2 | D6Q3 | D6Q4, _) => &[Y, PY, PN, N, NI],
        }
    }

    /// Question statement shown to the assessor and echoed in reports.
    pub fn prompt(self, variant: AnalysisVariant) -> &'static str {
        use QuestionId::*;
        match (self, variant) {
            (D1Q1, AnalysisVariant::IntentionToTreat) => {
                "Os autores controlaram todos os importantes fatores de confusão para os quais isso era necessário?"
            }
            (D1Q2, AnalysisVariant::IntentionToTreat) => {
                "Os fatores de confusão controlados foram medidos de forma válida e confiável?"
            }
            (D1Q3, AnalysisVariant::IntentionToTreat) => {
                "Os autores controlaram alguma variável pós-intervenção que poderia ter sido afetada pela intervenção?"
            }
            (D1Q4, AnalysisVariant::IntentionToTreat) => {
                "O uso de controles negativos sugeriu a presença de fatores de confusão não controlados?"
            }
            (D1Q1, AnalysisVariant::PerProtocol) => {
                "Os autores utilizaram um método de análise apropriado para controlar os fatores de confusão variáveis ao longo do tempo, bem como os basais?"
            }
            (D1Q2, AnalysisVariant::PerProtocol) => {
                "Os autores controlaram todos os importantes fatores de confusão basais e variáveis ao longo do tempo?"
            }
            (D1Q3, AnalysisVariant::PerProtocol) => {
                "Os fatores de confusão controlados foram medidos de forma válida e confiável?"
            }
            (D1Q4, AnalysisVariant::PerProtocol) => {
                "Os autores controlaram fatores que variam ao longo do tempo ou outras variáveis medidas após o início da intervenção?"
            }
            (D1Q5, _) => {
                "O uso de controles negativos, ou outras considerações, sugeriu a presença de fatores de confusão não controlados significativos?"
            }
            (D2Q1, _) => "As intervenções eram distinguíveis no início do acompanhamento?",
            (D2Q2, _) => {
                "Os eventos ocorreram após o momento em que as intervenções se tornaram distinguíveis?"
            }
            (D2Q3, _) => "A análise foi apropriada para a atribuição tardia das intervenções?",
            (D2Q4, _) => {
                "A classificação da intervenção pode ter sido influenciada pelo conhecimento do desfecho?"
            }
            (D2Q5, _) => "Houve erros adicionais na classificação das intervenções?",
            (D3Q1, _) => "O início do follow-up coincide com o início da intervenção?",
            (D3Q2, _) => "Houve exclusão de eventos iniciais do acompanhamento?",
            (D3Q3, _) => {
                "A seleção dos participantes foi baseada em características observadas após o início da intervenção?"
            }
            (D3Q4, _) => "As variáveis de seleção estão associadas à intervenção?",
            (D3Q5, _) => {
                "As variáveis de seleção foram influenciadas pelo desfecho ou por uma causa do desfecho?"
            }
            (D3Q6, _) => "A análise corrigiu o potencial viés de seleção?",
            (D3Q7, _) => "Análises de sensibilidade mostraram impacto mínimo do viés de seleção?",
            (D3Q8, _) => "O viés de seleção identificado é severo?",
            (D4Q1, _) => "Os dados da intervenção estavam completos para quase todos os participantes?",
            (D4Q2, _) => "Os dados do desfecho estavam completos para quase todos os participantes?",
            (D4Q3, _) => {
                "Os dados dos fatores de confusão estavam completos para quase todos os participantes?"
            }
            (D4Q4, _) => "A análise foi restrita aos casos completos?",
            (D4Q5, _) => "A exclusão de participantes está relacionada ao desfecho?",
            (D4Q6, _) => {
                "A relação entre exclusão e desfecho é explicada pelas variáveis do modelo de análise?"
            }
            (D4Q7, _) => "A análise utilizou imputação múltipla para os dados faltantes?",
            (D4Q8, _) => "A imputação foi conduzida sob pressupostos plausíveis?",
            (D4Q9, _) => "O método de imputação foi apropriado?",
            (D4Q10, _) => "O método alternativo utilizado para corrigir os dados faltantes é válido?",
            (D4Q11, _) => "Há evidência de que o resultado não foi enviesado pelos dados faltantes?",
            (D5Q1, _) => "Os métodos de medição do desfecho diferem entre os grupos de comparação?",
            (D5Q2, _) => "Os avaliadores do desfecho estavam cientes da intervenção recebida?",
            (D5Q3, _) => {
                "A avaliação do desfecho pode ter sido influenciada pelo conhecimento da intervenção?"
            }
            (D6Q1, _) => "O resultado foi relatado conforme um plano de análise pré-especificado?",
            (D6Q2, _) => "Há indícios de seleção entre múltiplas medidas do desfecho?",
            (D6Q3, _) => "Há indícios de seleção entre múltiplas análises?",
            (D6Q4, _) => "Há indícios de seleção entre múltiplos subgrupos?",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        QuestionId::from_code(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown question code '{raw}'")))
    }
}
