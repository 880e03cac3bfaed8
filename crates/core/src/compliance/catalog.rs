use crate::domain::conditions::ImpactLevel;
use crate::domain::practice::PracticeType;
use crate::domain::regulation::{
    ComplianceStatus, RegulationRecord, RegulationSource, RegulationType,
};

/// Static description of a regulation applying to a practice.
#[derive(Debug, PartialEq)]
pub struct CatalogRegulation {
    pub regulation_type: RegulationType,
    pub name: &'static str,
    pub impact_level: ImpactLevel,
    pub required_measures: &'static [&'static str],
    pub restrictions: &'static [&'static str],
    pub penalties: &'static [&'static str],
    pub legal_references: &'static [&'static str],
}

impl CatalogRegulation {
    pub fn to_record(&self, compliance_status: ComplianceStatus) -> RegulationRecord {
        RegulationRecord {
            regulation_type: self.regulation_type,
            name: self.name.to_string(),
            compliance_status,
            impact_level: self.impact_level,
            required_measures: owned(self.required_measures),
            restrictions: owned(self.restrictions),
            penalties: owned(self.penalties),
            legal_references: owned(self.legal_references),
            znt_requirements: None,
            source: RegulationSource::Catalog,
            product_id: None,
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

static SPRAYING: [CatalogRegulation; 3] = [
    CatalogRegulation {
        regulation_type: RegulationType::WaterProtection,
        name: "Protection des points d'eau",
        impact_level: ImpactLevel::High,
        required_measures: &[
            "Respecter la zone non traitée (ZNT) figurant sur l'étiquette, 5 m minimum",
            "Maintenir une bande enherbée le long des cours d'eau",
            "Remplir et rincer le pulvérisateur à l'écart des points d'eau",
        ],
        restrictions: &[
            "Traitement interdit à moins de 5 m des points d'eau",
            "Aucun déversement de fond de cuve dans le réseau hydrographique",
        ],
        penalties: &[
            "Amende jusqu'à 75 000 € et 2 ans d'emprisonnement (Code de l'environnement L.216-6)",
            "Réduction des aides PAC au titre de la conditionnalité",
        ],
        legal_references: &[
            "Arrêté du 4 mai 2017 relatif à la mise sur le marché et à l'utilisation des produits phytopharmaceutiques",
            "Code rural, article L.253-7",
        ],
    },
    CatalogRegulation {
        regulation_type: RegulationType::BiodiversityProtection,
        name: "Protection des abeilles et des pollinisateurs",
        impact_level: ImpactLevel::High,
        required_measures: &[
            "Utiliser uniquement des produits portant la mention abeilles en période de floraison",
            "Traiter dans les 2 heures précédant ou les 3 heures suivant le coucher du soleil",
        ],
        restrictions: &[
            "Traitement insecticide interdit sur cultures en fleurs sans mention abeilles",
        ],
        penalties: &["Amende de 5e classe, jusqu'à 1 500 €"],
        legal_references: &["Arrêté du 20 novembre 2021 relatif à la protection des abeilles"],
    },
    CatalogRegulation {
        regulation_type: RegulationType::AirQuality,
        name: "Limitation de la dérive de pulvérisation",
        impact_level: ImpactLevel::Moderate,
        required_measures: &[
            "Vérifier la vitesse du vent avant l'application",
            "Utiliser des buses anti-dérive",
        ],
        restrictions: &["Traitement interdit si le vent dépasse 19 km/h (degré 3 Beaufort)"],
        penalties: &["Amende de 4e classe, jusqu'à 750 €"],
        legal_references: &["Arrêté du 4 mai 2017, article 2"],
    },
];

static FERTILIZATION: [CatalogRegulation; 3] = [
    CatalogRegulation {
        regulation_type: RegulationType::NitrateDirective,
        name: "Directive nitrates",
        impact_level: ImpactLevel::High,
        required_measures: &[
            "Établir un plan prévisionnel de fumure",
            "Tenir à jour le cahier d'enregistrement des épandages",
            "Respecter le plafond de 170 kg d'azote organique par hectare et par an",
        ],
        restrictions: &[
            "Épandage interdit pendant les périodes d'interdiction du programme d'actions",
            "Épandage interdit sur sols gelés, enneigés ou inondés",
        ],
        penalties: &[
            "Amende jusqu'à 1 500 € par infraction",
            "Réduction des aides PAC au titre de la conditionnalité",
        ],
        legal_references: &[
            "Directive 91/676/CEE du Conseil du 12 décembre 1991",
            "Arrêté du 19 décembre 2011 relatif au programme d'actions national nitrates",
        ],
    },
    CatalogRegulation {
        regulation_type: RegulationType::WaterProtection,
        name: "Distances d'épandage aux cours d'eau",
        impact_level: ImpactLevel::Moderate,
        required_measures: &[
            "Respecter une distance d'au moins 35 m des berges, réduite à 10 m avec bande enherbée",
        ],
        restrictions: &["Épandage interdit à moins de 5 m des points d'eau"],
        penalties: &["Amende jusqu'à 1 500 €"],
        legal_references: &["Arrêté du 19 décembre 2011, annexe I"],
    },
    CatalogRegulation {
        regulation_type: RegulationType::AirQuality,
        name: "Émissions d'ammoniac",
        impact_level: ImpactLevel::Moderate,
        required_measures: &[
            "Enfouir les effluents dans les 12 heures suivant l'épandage sur sol nu",
            "Privilégier les matériels d'épandage à pendillards ou à injection",
        ],
        restrictions: &["Épandage déconseillé par vent fort"],
        penalties: &["Amende de 4e classe, jusqu'à 750 €"],
        legal_references: &["Plan national de réduction des émissions de polluants atmosphériques (PREPA)"],
    },
];

static IRRIGATION: [CatalogRegulation; 2] = [
    CatalogRegulation {
        regulation_type: RegulationType::WaterUsage,
        name: "Prélèvements d'eau pour l'irrigation",
        impact_level: ImpactLevel::Moderate,
        required_measures: &[
            "Déclarer ou faire autoriser le prélèvement selon le volume",
            "Équiper le point de prélèvement d'un compteur volumétrique",
        ],
        restrictions: &["Respecter les arrêtés préfectoraux de restriction en période de sécheresse"],
        penalties: &["Amende jusqu'à 1 500 €, suspension de l'autorisation de prélèvement"],
        legal_references: &[
            "Code de l'environnement, articles L.214-1 à L.214-6",
            "Code de l'environnement, article R.211-66",
        ],
    },
    CatalogRegulation {
        regulation_type: RegulationType::GroundwaterProtection,
        name: "Protection des eaux souterraines",
        impact_level: ImpactLevel::Moderate,
        required_measures: &[
            "Installer un dispositif anti-retour sur les forages",
            "Déclarer tout forage domestique ou agricole en mairie",
        ],
        restrictions: &["Forage interdit dans les périmètres de protection des captages"],
        penalties: &["Amende jusqu'à 1 500 €"],
        legal_references: &["Code minier, article L.411-1", "Code de l'environnement, article L.211-1"],
    },
];

/// Catalog regulations applying to a practice; `Other` practices have none.
pub fn regulations_for(practice: &PracticeType) -> &'static [CatalogRegulation] {
    match practice {
        PracticeType::Spraying => &SPRAYING,
        PracticeType::Fertilization => &FERTILIZATION,
        PracticeType::Irrigation => &IRRIGATION,
        PracticeType::Other(_) => &[],
    }
}
