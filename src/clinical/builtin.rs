//! Bundled Spanish-language taxonomy.
//!
//! Pattern names and cues use Spanish clinical vocabulary, the language the
//! narratives are written in. Exam steps, studies and actions are English.
//! Cues are matched at word starts after normalization, so a stem such as
//! "opresiv" covers "opresivo" and "opresiva".

use crate::models::AttributeKind::{
    self, AssociatedSymptoms, Duration, Frequency, Intensity, Location, ModifyingFactors, Onset,
    Progression, Quality, Radiation, Triggers,
};
use crate::models::BodySystem;

use super::taxonomy::{
    ExpectedAttribute, KeyPhrase, LexiconEntry, PatternDocument, RedFlagDocument,
    SystemDocument, TaxonomyDocument,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn attr(kind: AttributeKind, cues: &[&str]) -> ExpectedAttribute {
    ExpectedAttribute {
        kind,
        cues: strings(cues),
        implies_pattern: false,
    }
}

/// Attribute whose cues also confirm the symptom.
fn implying(kind: AttributeKind, cues: &[&str]) -> ExpectedAttribute {
    ExpectedAttribute {
        implies_pattern: true,
        ..attr(kind, cues)
    }
}

fn phrase(label: &str, variants: &[&str]) -> KeyPhrase {
    KeyPhrase {
        label: label.into(),
        variants: strings(variants),
    }
}

fn red_flag(id: &str, description: &str, key_phrases: Vec<KeyPhrase>, action: &str) -> RedFlagDocument {
    RedFlagDocument {
        id: id.into(),
        description: description.into(),
        key_phrases,
        recommended_action: action.into(),
    }
}

struct PatternEntry<'a> {
    name: &'a str,
    aliases: &'a [&'a str],
    attributes: Vec<ExpectedAttribute>,
    red_flags: &'a [&'a str],
    exam: &'a [&'a str],
    studies: &'a [&'a str],
    considerations: &'a [&'a str],
}

impl From<PatternEntry<'_>> for PatternDocument {
    fn from(entry: PatternEntry<'_>) -> Self {
        PatternDocument {
            name: entry.name.into(),
            aliases: strings(entry.aliases),
            expected_attributes: entry.attributes,
            red_flags: strings(entry.red_flags),
            suggested_exam: strings(entry.exam),
            suggested_studies: strings(entry.studies),
            considerations: strings(entry.considerations),
        }
    }
}

/// The bundled taxonomy as a document, validated by `Taxonomy::builtin`.
pub fn document() -> TaxonomyDocument {
    TaxonomyDocument {
        systems: vec![
            neurological(),
            cardiopulmonary(),
            digestive(),
            musculoskeletal(),
            general(),
        ],
        attribute_lexicon: lexicon(),
    }
}

fn lexicon() -> Vec<LexiconEntry> {
    let entry = |kind, cues: &[&str]| LexiconEntry {
        kind,
        cues: strings(cues),
    };
    vec![
        entry(
            Intensity,
            &["intens", "escala", "leve", "moderad", "sever", "fuerte", "insoportable", "muy doloros"],
        ),
        entry(
            Duration,
            &["desde hace", "desde ayer", "desde anoche", "desde esta manana", "de evolucion", "cronic", "hace tiempo"],
        ),
        entry(
            ModifyingFactors,
            &["empeora", "mejora", "mejoria", "alivia", "agrava", "se intensifica", "cede con", "cede al", "no cede", "calma con"],
        ),
        entry(
            Progression,
            &["progres", "cada vez", "ha ido", "en aumento", "estable", "sin cambios", "fluctuante", "empeorando", "mejorando", "evoluciona"],
        ),
        entry(
            Frequency,
            &["veces al dia", "veces por", "diari", "cada dia", "episodios", "intermitente", "continu", "constante", "ocasional"],
        ),
        entry(
            Onset,
            &["inicio", "comenzo", "empezo", "subit", "brusc", "insidios", "gradual", "repentin"],
        ),
        entry(Triggers, &["desencaden", "provocad", "despues de comer"]),
        entry(AssociatedSymptoms, &["acompan", "asociad", "junto con"]),
        entry(Radiation, &["irradia", "se extiende", "se corre hacia"]),
    ]
}

// ---------------------------------------------------------------------------
// Neurological
// ---------------------------------------------------------------------------

fn neurological() -> SystemDocument {
    SystemDocument {
        system: BodySystem::Neurological,
        red_flag_patterns: strings(&["cefalea súbita intensa", "alteración de conciencia", "déficit focal"]),
        red_flags: vec![
            red_flag(
                "NEURO-01",
                "Sudden, severe headache (\"worst of life\") or headache with neck stiffness or altered consciousness",
                vec![
                    phrase("peor dolor de cabeza", &["peor cefalea", "el peor dolor de su vida"]),
                    phrase("inicio súbito", &["inicio brusco", "inicio repentino", "subitamente"]),
                    phrase("rigidez nucal", &["rigidez de nuca"]),
                    phrase("alteración de conciencia", &["alteracion del estado de conciencia", "perdida de conciencia"]),
                ],
                "Immediate derivation to emergency services; urgent non-contrast head CT; neurology assessment; withhold analgesics until the evaluation is complete",
            ),
            red_flag(
                "NEURO-02",
                "Fever with signs of meningeal irritation",
                vec![
                    phrase("fiebre", &["febril"]),
                    phrase("rigidez nucal", &["rigidez de nuca"]),
                    phrase("fotofobia", &[]),
                    phrase("petequias", &["exantema petequial"]),
                    phrase("confusión", &["desorientacion"]),
                ],
                "Urgent evaluation in emergency services; assess meningeal signs and follow the local lumbar puncture and blood culture protocol",
            ),
            red_flag(
                "NEURO-03",
                "Acute focal neurological deficit",
                vec![
                    phrase("debilidad súbita", &["perdida de fuerza subita", "debilidad de un lado", "hemiparesia"]),
                    phrase("alteración del habla", &["dificultad para hablar", "disartria", "afasia"]),
                    phrase("desviación de la comisura", &["boca torcida", "asimetria facial"]),
                    phrase("pérdida de visión", &["vision doble", "diplopia"]),
                ],
                "Activate the stroke code: immediate derivation to emergency services for urgent neuroimaging; record the time of symptom onset",
            ),
        ],
        patterns: vec![
            PatternEntry {
                name: "cefalea",
                aliases: &["dolor de cabeza", "cefalalgia"],
                attributes: vec![
                    attr(Intensity, &[]),
                    attr(Duration, &[]),
                    attr(Location, &["frontal", "temporal", "occipital", "holocrane", "hemicrane", "unilateral", "bilateral", "retroocular", "en casco"]),
                    attr(Quality, &["pulsatil", "opresiv", "punzante", "terebrante", "en estallido"]),
                    attr(ModifyingFactors, &[]),
                    attr(AssociatedSymptoms, &["nausea", "vomito", "fotofobia", "fonofobia", "aura"]),
                    attr(Onset, &[]),
                ],
                red_flags: &["NEURO-01", "NEURO-02"],
                exam: &[
                    "Vital signs with emphasis on blood pressure",
                    "Basic neurological examination",
                    "Assessment of neck stiffness and meningeal signs",
                    "Fundoscopy when available",
                ],
                studies: &[
                    "Complete the clinical characterization before requesting specific studies",
                    "Urgent non-contrast head CT only if warning signs are present",
                ],
                considerations: &[
                    "Distinguish a primary headache from a secondary one",
                    "Characterize the temporal pattern and associated features",
                ],
            }
            .into(),
            PatternEntry {
                name: "mareo",
                aliases: &["mareos"],
                attributes: vec![
                    implying(Quality, &["vertigo", "inestabilidad", "presincope", "sensacion de giro"]),
                    attr(Duration, &[]),
                    attr(Frequency, &[]),
                    attr(Triggers, &["al girar la cabeza", "al levantarse", "cambios de posicion", "al incorporarse"]),
                    attr(AssociatedSymptoms, &["nausea", "acufeno", "tinnitus", "hipoacusia", "vomito"]),
                    attr(Onset, &[]),
                ],
                red_flags: &["NEURO-03"],
                exam: &[
                    "Orthostatic blood pressure measurement",
                    "Nystagmus assessment",
                    "Coordination and balance assessment (Romberg, gait)",
                    "Cranial nerve examination",
                ],
                studies: &["Capillary blood glucose"],
                considerations: &["Distinguish rotatory vertigo from presyncope or imbalance"],
            }
            .into(),
            PatternEntry {
                name: "debilidad",
                aliases: &["perdida de fuerza"],
                attributes: vec![
                    attr(Location, &["focal", "hemicuerpo", "brazo", "pierna", "generalizada", "proximal", "distal"]),
                    attr(Onset, &[]),
                    attr(Progression, &[]),
                    attr(Duration, &[]),
                    attr(AssociatedSymptoms, &["alteracion del habla", "desviacion de la comisura", "hormigueo", "adormecimiento"]),
                ],
                red_flags: &["NEURO-03"],
                exam: &[
                    "Muscle strength grading by segment",
                    "Deep tendon reflex assessment",
                    "Cranial nerve examination",
                    "Gait assessment",
                ],
                studies: &["Capillary blood glucose", "Basic metabolic panel with electrolytes"],
                considerations: &["Establish whether the weakness is focal or generalized"],
            }
            .into(),
            PatternEntry {
                name: "parestesias",
                aliases: &["parestesia"],
                attributes: vec![
                    implying(Quality, &["hormigueo", "adormecimiento", "entumecimiento", "acorchamiento", "pinchazos"]),
                    attr(Location, &["pierna", "brazo", "mano", "pie", "dedos", "cara", "dermatoma", "miembro"]),
                    attr(Duration, &[]),
                    attr(Progression, &[]),
                    attr(Frequency, &[]),
                ],
                red_flags: &["NEURO-03"],
                exam: &[
                    "Sensory examination by dermatome",
                    "Muscle strength assessment in the affected territory",
                    "Deep tendon reflex assessment",
                ],
                studies: &["Capillary blood glucose"],
                considerations: &["Map the distribution to a dermatome, nerve or glove-and-stocking pattern"],
            }
            .into(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Cardiopulmonary
// ---------------------------------------------------------------------------

fn cardiopulmonary() -> SystemDocument {
    SystemDocument {
        system: BodySystem::Cardiopulmonary,
        red_flag_patterns: strings(&["dolor torácico opresivo", "disnea súbita", "síncope"]),
        red_flags: vec![
            red_flag(
                "CARD-01",
                "Oppressive chest pain with radiation, autonomic signs or syncope",
                vec![
                    phrase("dolor opresivo", &["dolor toracico opresivo", "opresion en el pecho", "opresion toracica"]),
                    phrase("irradiación a mandíbula o brazo izquierdo", &["irradiado a mandibula", "irradiado al brazo izquierdo", "irradia al brazo izquierdo", "irradia a mandibula", "irradia a la mandibula"]),
                    phrase("diaforesis", &["sudoracion profusa", "sudor frio"]),
                    phrase("disnea", &["falta de aire"]),
                    phrase("síncope", &["desmayo", "perdida de conocimiento"]),
                ],
                "Obtain a 12-lead ECG within 10 minutes and arrange immediate derivation to emergency services",
            ),
            red_flag(
                "CARD-02",
                "Acute respiratory compromise",
                vec![
                    phrase("disnea súbita", &["falta de aire repentina", "disnea de inicio subito"]),
                    phrase("cianosis", &["labios azulados"]),
                    phrase("hemoptisis", &["tos con sangre", "esputo con sangre"]),
                    phrase("dolor pleurítico", &["dolor al respirar"]),
                    phrase("desaturación", &["saturacion baja"]),
                ],
                "Measure oxygen saturation immediately, provide supplemental oxygen per protocol and arrange urgent emergency evaluation",
            ),
        ],
        patterns: vec![
            PatternEntry {
                name: "dolor torácico",
                aliases: &["dolor en el pecho", "dolor de pecho", "dolor precordial"],
                attributes: vec![
                    attr(Intensity, &[]),
                    attr(Duration, &[]),
                    attr(Quality, &["opresiv", "punzante", "urente", "pleuritico", "quemazon"]),
                    attr(Radiation, &["mandibula", "brazo izquierdo", "espalda", "cuello"]),
                    attr(Triggers, &["esfuerzo", "ejercicio", "al caminar", "al subir escaleras", "estres"]),
                    attr(ModifyingFactors, &[]),
                    attr(AssociatedSymptoms, &["diaforesis", "sudoracion", "nausea", "disnea", "palpitaciones"]),
                ],
                red_flags: &["CARD-01"],
                exam: &[
                    "Complete vital signs",
                    "Cardiopulmonary auscultation",
                    "Peripheral pulse assessment",
                    "Chest wall inspection and palpation",
                ],
                studies: &["12-lead electrocardiogram", "Cardiac biomarkers per local protocol"],
                considerations: &[
                    "Rule out a cardiovascular origin before other causes",
                    "Characterize relation to exertion and associated autonomic signs",
                ],
            }
            .into(),
            PatternEntry {
                name: "disnea",
                aliases: &["falta de aire", "dificultad respiratoria", "sensacion de ahogo", "ahogo"],
                attributes: vec![
                    attr(Intensity, &["clase funcional", "mmrc"]),
                    attr(Duration, &[]),
                    attr(Onset, &[]),
                    attr(Progression, &[]),
                    attr(Triggers, &["esfuerzo", "al caminar", "al subir escaleras", "decubito", "ortopnea"]),
                    attr(AssociatedSymptoms, &["tos", "dolor toracico", "sibilancias", "edema", "fiebre"]),
                ],
                red_flags: &["CARD-02"],
                exam: &[
                    "Oxygen saturation measurement",
                    "Detailed lung auscultation",
                    "Assessment of accessory muscle use",
                    "Respiratory rate at rest",
                ],
                studies: &["Chest X-ray", "12-lead electrocardiogram"],
                considerations: &["Relate the dyspnea to exertion, position and time of day"],
            }
            .into(),
            PatternEntry {
                name: "palpitaciones",
                aliases: &["taquicardia"],
                attributes: vec![
                    attr(Frequency, &[]),
                    attr(Quality, &["regular", "irregular", "rapid", "latido fuerte", "vuelco"]),
                    attr(Duration, &[]),
                    attr(Triggers, &["esfuerzo", "cafe", "cafeina", "estres", "ansiedad"]),
                    attr(Onset, &[]),
                    attr(AssociatedSymptoms, &["mareo", "sincope", "dolor toracico", "disnea"]),
                ],
                red_flags: &["CARD-01"],
                exam: &[
                    "Heart rate and rhythm assessment",
                    "Blood pressure measurement",
                    "Cardiac auscultation",
                ],
                studies: &["12-lead electrocardiogram", "Thyroid function tests"],
                considerations: &[],
            }
            .into(),
            PatternEntry {
                name: "tos",
                aliases: &[],
                attributes: vec![
                    attr(Quality, &["seca", "productiva", "con expectoracion", "flema", "perruna"]),
                    attr(Duration, &[]),
                    attr(Frequency, &["nocturna", "persistente"]),
                    attr(Progression, &[]),
                    attr(AssociatedSymptoms, &["fiebre", "disnea", "hemoptisis", "dolor toracico"]),
                ],
                red_flags: &["CARD-02"],
                exam: &[
                    "Lung auscultation",
                    "Oxygen saturation measurement",
                    "Temperature measurement",
                ],
                studies: &["Chest X-ray if the cough persists beyond three weeks"],
                considerations: &[],
            }
            .into(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Digestive
// ---------------------------------------------------------------------------

fn digestive() -> SystemDocument {
    SystemDocument {
        system: BodySystem::Digestive,
        red_flag_patterns: strings(&["dolor abdominal agudo", "rectorragia", "ictericia"]),
        red_flags: vec![
            red_flag(
                "DIG-01",
                "Acute abdomen",
                vec![
                    phrase("dolor abdominal súbito", &["dolor abdominal intenso", "dolor abdominal de inicio subito"]),
                    phrase("irritación peritoneal", &["abdomen en tabla", "defensa abdominal", "rebote positivo", "blumberg"]),
                    phrase("vómitos incoercibles", &["vomitos persistentes"]),
                    phrase("distensión abdominal", &["abdomen distendido"]),
                    phrase("hipotensión", &["presion baja"]),
                ],
                "Urgent surgical evaluation in emergency services; keep the patient fasting and monitor vital signs",
            ),
            red_flag(
                "DIG-02",
                "Signs of gastrointestinal bleeding",
                vec![
                    phrase("melena", &["heces negras"]),
                    phrase("hematemesis", &["vomitos con sangre", "vomito con sangre", "posos de cafe"]),
                    phrase("rectorragia", &["hematoquecia", "sangre en heces", "sangrado rectal"]),
                    phrase("inestabilidad hemodinámica", &["hipotension", "palidez"]),
                ],
                "Immediate derivation to emergency services for hemodynamic assessment and urgent endoscopic evaluation",
            ),
        ],
        patterns: vec![
            PatternEntry {
                name: "dolor abdominal",
                aliases: &["dolor de barriga", "dolor de estomago", "dolor en el abdomen", "abdominalgia", "epigastralgia"],
                attributes: vec![
                    attr(Location, &["epigastri", "hipocondrio", "fosa iliaca", "periumbilical", "hipogastri", "flanco", "difuso", "cuadrante"]),
                    attr(Quality, &["colico", "punzante", "urente", "sordo", "opresiv"]),
                    attr(Radiation, &[]),
                    attr(Intensity, &[]),
                    attr(Duration, &[]),
                    attr(ModifyingFactors, &[]),
                    attr(AssociatedSymptoms, &["nausea", "vomito", "fiebre", "diarrea", "ictericia"]),
                ],
                red_flags: &["DIG-01", "DIG-02"],
                exam: &[
                    "Abdominal palpation by quadrants",
                    "Auscultation of bowel sounds",
                    "Assessment of peritoneal irritation signs",
                    "Vital signs with emphasis on temperature",
                ],
                studies: &["Complete blood count", "Abdominal ultrasound if the pain persists or is localized"],
                considerations: &[
                    "Determine whether the presentation needs surgical evaluation",
                    "Relate the pain to meals, bowel habit and urinary symptoms",
                ],
            }
            .into(),
            PatternEntry {
                name: "náuseas",
                aliases: &["nausea", "vomito", "emesis"],
                attributes: vec![
                    attr(Quality, &["alimentario", "bilioso", "en posos de cafe", "con sangre", "fecaloide"]),
                    attr(Frequency, &[]),
                    attr(Triggers, &["tras comer", "despues de comer", "postprandial", "en ayunas"]),
                    attr(Duration, &[]),
                    attr(AssociatedSymptoms, &["dolor abdominal", "diarrea", "fiebre", "cefalea"]),
                ],
                red_flags: &["DIG-02"],
                exam: &["Hydration status assessment", "Abdominal examination", "Complete vital signs"],
                studies: &["Serum electrolytes if vomiting is persistent"],
                considerations: &[],
            }
            .into(),
            PatternEntry {
                name: "diarrea",
                aliases: &["deposiciones liquidas"],
                attributes: vec![
                    attr(Frequency, &["deposiciones al dia", "deposiciones diarias"]),
                    attr(Quality, &["liquida", "acuosa", "pastosa", "con moco"]),
                    attr(Duration, &[]),
                    attr(AssociatedSymptoms, &["fiebre", "dolor abdominal", "vomito", "sangre"]),
                ],
                red_flags: &["DIG-02"],
                exam: &["Hydration status assessment", "Abdominal examination", "Complete vital signs"],
                studies: &["Stool studies if the diarrhea persists or contains blood"],
                considerations: &[],
            }
            .into(),
            PatternEntry {
                name: "estreñimiento",
                aliases: &["constipacion"],
                attributes: vec![
                    attr(Duration, &[]),
                    attr(Frequency, &["deposiciones por semana", "deposiciones a la semana"]),
                    attr(Progression, &["cambio reciente"]),
                    attr(AssociatedSymptoms, &["dolor abdominal", "sangre", "perdida de peso", "distension"]),
                ],
                red_flags: &[],
                exam: &["Abdominal examination", "Rectal examination if indicated"],
                studies: &[],
                considerations: &["Ask about recent changes in bowel habit"],
            }
            .into(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Musculoskeletal
// ---------------------------------------------------------------------------

fn musculoskeletal() -> SystemDocument {
    SystemDocument {
        system: BodySystem::Musculoskeletal,
        red_flag_patterns: strings(&["dolor lumbar con síntomas neurológicos", "impotencia funcional súbita"]),
        red_flags: vec![
            red_flag(
                "MSK-01",
                "Progressive neurological compromise or suspected cauda equina syndrome",
                vec![
                    phrase("alteración de esfínteres", &["incontinencia", "retencion urinaria", "perdida de control de esfinteres"]),
                    phrase("anestesia en silla de montar", &["silla de montar"]),
                    phrase("déficit neurológico progresivo", &["debilidad progresiva", "perdida de fuerza progresiva"]),
                    phrase("debilidad en miembros inferiores", &["perdida de fuerza en las piernas", "debilidad en las piernas"]),
                ],
                "Immediate derivation to emergency services for urgent spinal MRI and surgical assessment",
            ),
            red_flag(
                "MSK-02",
                "Significant trauma, suspected fracture or sudden loss of function",
                vec![
                    phrase(
                        "traumatismo",
                        &[
                            "trauma directo",
                            "caida desde",
                            "caida de altura",
                            "caida de su propia altura",
                            "caida al suelo",
                            "se cayo",
                            "accidente de transito",
                            "accidente de trafico",
                            "accidente laboral",
                            "accidente deportivo",
                        ],
                    ),
                    phrase("deformidad", &[]),
                    phrase("impotencia funcional", &["incapacidad para apoyar", "no puede caminar"]),
                    phrase("dolor nocturno", &["no cede con el reposo", "dolor que no cede"]),
                ],
                "Immobilize the affected region and obtain urgent imaging before further mobilization",
            ),
        ],
        patterns: vec![
            PatternEntry {
                name: "dolor articular",
                aliases: &["artralgia", "dolor de rodilla", "dolor en la rodilla", "dolor de hombro", "dolor en el hombro"],
                attributes: vec![
                    attr(Location, &["rodilla", "hombro", "codo", "muneca", "tobillo", "cadera", "monoarticular", "poliarticular", "simetric"]),
                    attr(Quality, &["inflamator", "mecanic", "rigidez matutina"]),
                    attr(Intensity, &[]),
                    attr(Duration, &[]),
                    attr(ModifyingFactors, &[]),
                    attr(AssociatedSymptoms, &["tumefaccion", "hinchazon", "enrojecimiento", "calor local", "fiebre"]),
                ],
                red_flags: &["MSK-02"],
                exam: &[
                    "Inspection of the affected joint",
                    "Palpation to identify tender points",
                    "Range-of-motion assessment",
                    "Assessment of local inflammatory signs",
                ],
                studies: &[
                    "Inflammatory markers (ESR, CRP)",
                    "Plain radiograph of the affected joint after trauma or with persistent pain",
                ],
                considerations: &["Distinguish inflammatory from mechanical joint pain"],
            }
            .into(),
            PatternEntry {
                name: "dolor lumbar",
                aliases: &["lumbalgia", "lumbago", "dolor de espalda baja", "dolor en la zona lumbar"],
                attributes: vec![
                    attr(Intensity, &[]),
                    attr(Duration, &[]),
                    attr(Location, &["paravertebral", "lumbosacr", "sacro", "central", "unilateral", "bilateral", "lado derecho", "lado izquierdo", "glute", "nalga"]),
                    attr(ModifyingFactors, &[]),
                    attr(Progression, &[]),
                ],
                red_flags: &["MSK-01", "MSK-02"],
                exam: &[
                    "Lumbar spine range-of-motion assessment",
                    "Lower-limb sensation and strength assessment",
                    "Straight leg raise test (Lasègue)",
                    "Deep tendon reflex assessment",
                ],
                studies: &[
                    "Lumbosacral imaging only with warning signs or pain beyond six weeks",
                    "Inflammatory markers (ESR, CRP) if inflammatory features are present",
                ],
                considerations: &[
                    "Distinguish mechanical from inflammatory back pain",
                    "Look for radicular involvement",
                ],
            }
            .into(),
            PatternEntry {
                name: "limitación funcional",
                aliases: &["limitacion de la movilidad", "dificultad para moverse"],
                attributes: vec![
                    attr(Location, &["hombro", "rodilla", "cadera", "columna", "cuello", "mano"]),
                    attr(Onset, &[]),
                    attr(Progression, &[]),
                    attr(Duration, &[]),
                    attr(Quality, &["rigidez", "bloqueo", "inestabilidad"]),
                ],
                red_flags: &["MSK-02"],
                exam: &[
                    "Active and passive range-of-motion assessment",
                    "Muscle strength assessment",
                    "Functional gait assessment",
                ],
                studies: &[],
                considerations: &[],
            }
            .into(),
        ],
    }
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

fn general() -> SystemDocument {
    SystemDocument {
        system: BodySystem::General,
        red_flag_patterns: strings(&[]),
        red_flags: vec![red_flag(
            "GEN-01",
            "Fever with hemodynamic or mental-status warning signs",
            vec![
                phrase("fiebre", &["febril"]),
                phrase("hipotensión", &["presion baja"]),
                phrase("confusión", &["desorientacion", "somnolencia"]),
                phrase("escalofríos intensos", &["tiritona"]),
            ],
            "Urgent evaluation in emergency services with sepsis screening per local protocol",
        )],
        patterns: vec![PatternEntry {
            name: "fiebre",
            aliases: &["febricula", "febril", "temperatura elevada"],
            attributes: vec![
                attr(Intensity, &["38", "39", "40", "grados"]),
                attr(Duration, &[]),
                attr(Frequency, &["intermitente", "vespertina", "nocturna"]),
                attr(Progression, &[]),
                attr(AssociatedSymptoms, &["escalofrios", "sudoracion", "malestar", "tiritona"]),
            ],
            red_flags: &["GEN-01"],
            exam: &["Temperature measurement", "Systematic search for an infectious focus"],
            studies: &["Complete blood count if the fever persists beyond 72 hours"],
            considerations: &["Look for a focus before attributing the fever to a systemic cause"],
        }
        .into()],
    }
}
