//routines.rs
use tracing::info;

use crate::error::Result;
use crate::images::ImageSource;
use crate::models::{Exercise, Plan, Routine};

const COOLDOWN: &str = "figure.cooldown";
const FLEXIBILITY: &str = "figure.flexibility";
const STRENGTH: &str = "figure.strengthtraining.functional";
const CORE: &str = "figure.core.training";

const HIP_FLEXOR_IMG: &str =
    "https://spotebi.com/wp-content/uploads/2015/03/hip-flexor-stretch-exercise-illustration.jpg";
const CHEST_STRETCH_IMG: &str =
    "https://spotebi.com/wp-content/uploads/2015/06/chest-stretch-exercise-illustration.jpg";
const CHIN_TUCK_IMG: &str =
    "https://www.shutterstock.com/image-vector/chin-tuck-head-text-neck-600nw-2158119513.jpg";
const ROMANIAN_DEADLIFT_IMG: &str =
    "https://spotebi.com/wp-content/uploads/2015/05/romanian-deadlift-exercise-illustration.jpg";
const PUSH_UP_IMG: &str =
    "https://spotebi.com/wp-content/uploads/2014/10/push-up-exercise-illustration.jpg";

const FOAM_ROLLER_IMG: &str = "7753-m-crop.png";
const HIP_THRUST_IMG: &str = "6548-m-crop.png";
const PALLOF_IMG: &str = "9377-m-crop.png";
const FACE_PULL_IMG: &str = "2652-m-crop.png";
const PULL_UP_IMG: &str = "1157-m-crop.png";
const GOBLET_IMG: &str = "1735-m-crop.png";

/// Builds the whole postural plan in execution order. Every illustration is
/// resolved through `src` as it is needed.
pub fn build_plan<S: ImageSource>(src: &mut S) -> Result<Plan> {
    info!("Building postural plan routines...");

    Ok(Plan {
        routines: vec![
            phase1(src)?,
            phase2_posterior(src)?,
            phase2_anterior(src)?,
            phase2_mobility(src)?,
            phase3_posterior(src)?,
            phase3_anterior(src)?,
            phase3_mobility(src)?,
        ],
    })
}

fn phase1<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 1 - Movilidad y activacion",
        vec![
            Exercise::new("Foam roller toracico", 0)
                .duration(120)
                .description("Apoya la parte alta de la espalda sobre el rodillo (de la mitad de la espalda hasta los omoplatos). Brazos cruzados sobre el pecho. Rueda lentamente arriba y abajo.")
                .icon(COOLDOWN)
                .images(src.images(FOAM_ROLLER_IMG)?)
                .rest_after(15),
            Exercise::new("Estiramiento flexores de cadera", 1)
                .duration(45)
                .description("Rodilla trasera en el suelo. Pie delantero a 90 grados. Aprieta gluteo del lado trasero y avanza la cadera hacia delante. No arquees la lumbar.")
                .icon(FLEXIBILITY)
                .sets(3, 10)
                .rest_after(15)
                .images(src.images(HIP_FLEXOR_IMG)?),
            Exercise::new("Estiramiento pectoral en puerta", 2)
                .duration(30)
                .description("De pie en marco de puerta. Antebrazos en los laterales con codos a 90 grados. Avanza un pie y deja que el torso pase entre los brazos.")
                .icon(FLEXIBILITY)
                .sets(3, 10)
                .rest_after(15)
                .images(src.images(CHEST_STRETCH_IMG)?),
            Exercise::new("Chin tucks (retraccion cervical)", 3)
                .description("De pie contra la pared. Lleva la barbilla hacia atras como si hicieras doble papada. Manten 5 segundos cada repeticion.")
                .icon(COOLDOWN)
                .sets(3, 15)
                .rest_after(15)
                .reps(10, 5)
                .images(src.images(CHIN_TUCK_IMG)?),
            Exercise::new("Cat-cow", 4)
                .description("En cuadrupedia. Inspira arqueando la espalda (cow). Espira redondeando la espalda (cat). Movimiento lento sincronizado con la respiracion.")
                .icon(FLEXIBILITY)
                .sets(2, 15)
                .rest_after(15)
                .reps(10, 6)
                .images(src.images("https://spotebi.com/wp-content/uploads/2014/10/cat-back-stretch-exercise-illustration.jpg")?),
            Exercise::new("Glute bridge", 5)
                .description("Tumbado boca arriba, pies apoyados. Empuja con talones para levantar la cadera. Aprieta gluteos arriba 3 segundos. Baja controladamente.")
                .icon(STRENGTH)
                .sets(3, 15)
                .rest_after(15)
                .reps(15, 5)
                .images(src.images("https://spotebi.com/wp-content/uploads/2015/01/glute-bridge-exercise-illustration.jpg")?),
            Exercise::new("Dead bug", 6)
                .description("Tumbado boca arriba, brazos al techo, rodillas a 90 grados. Extiende un brazo y la pierna contraria lentamente. La espalda baja pegada al suelo.")
                .icon(CORE)
                .sets(3, 15)
                .rest_after(15)
                .reps(8, 6)
                .images(src.images("https://spotebi.com/wp-content/uploads/2015/05/dead-bug-exercise-illustration.jpg")?),
            Exercise::new("Band pull-apart", 7)
                .description("De pie, banda elastica a la altura del pecho con brazos extendidos. Separa las manos apretando las escapulas. Manten 2 segundos.")
                .icon(STRENGTH)
                .sets(3, 15)
                .rest_after(15)
                .reps(15, 4)
                .images(src.images("https://spotebi.com/wp-content/uploads/2017/11/resistance-band-mid-back-pull-exercise-illustration-spotebi.jpg")?),
            Exercise::new("Wall slides", 8)
                .description("De pie con espalda, cabeza, codos y munecas contra la pared. Posicion W, sube a Y deslizando por la pared. Baja controladamente.")
                .icon(COOLDOWN)
                .sets(3, 15)
                .rest_after(0)
                .reps(10, 5)
                .images(src.images("10249-m-crop.png")?),
        ],
    ))
}

fn phase2_posterior<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 2 - Dia A (Cadena posterior)",
        vec![
            Exercise::new("Hip thrust con carga", 0)
                .description("Espalda alta en banco. Barra sobre cadera. Empuja con talones, aprieta gluteos arriba 2 segundos. No hiperextiendas la lumbar.")
                .icon(STRENGTH)
                .sets(4, 60)
                .rest_after(60)
                .reps(12, 5)
                .images(src.images(HIP_THRUST_IMG)?),
            Exercise::new("Peso muerto rumano (mancuernas)", 1)
                .description("De pie con mancuernas. Empuja caderas hacia atras manteniendo espalda neutra. Baja hasta sentir estiramiento en isquiotibiales. Vuelve apretando gluteos.")
                .icon(STRENGTH)
                .sets(4, 60)
                .rest_after(60)
                .reps(10, 5)
                .images(src.images(ROMANIAN_DEADLIFT_IMG)?),
            Exercise::new("Pallof press", 2)
                .description("De pie perpendicular al punto de anclaje. Extiende brazos al frente resistiendo la rotacion. Manten 2 segundos con brazos extendidos.")
                .icon(CORE)
                .sets(3, 45)
                .rest_after(60)
                .reps(10, 5)
                .images(src.images(PALLOF_IMG)?),
            Exercise::new("Face pull", 3)
                .description("Polea alta con cuerda. Tira hacia la cara con codos altos. Rota externamente los hombros separando la cuerda. Aprieta escapulas 2 segundos.")
                .icon(STRENGTH)
                .sets(4, 45)
                .rest_after(60)
                .reps(15, 4)
                .images(src.images(FACE_PULL_IMG)?),
            Exercise::new("Pull-ups", 4)
                .description("Agarre prono. Inicia deprimiendo escapulas antes de doblar codos. Sube hasta que la barbilla pase la barra. Baja controlado 3 segundos.")
                .icon(STRENGTH)
                .sets(3, 90)
                .rest_after(0)
                .reps(8, 6)
                .images(src.images(PULL_UP_IMG)?),
        ],
    ))
}

fn phase2_anterior<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 2 - Dia B (Cadena anterior)",
        vec![
            Exercise::new("Sentadilla goblet", 0)
                .description("Mancuerna al pecho. Pies mas anchos que hombros. Baja controlando, rodillas hacia fuera. Sube empujando con talones.")
                .icon(STRENGTH)
                .sets(4, 60)
                .rest_after(60)
                .reps(12, 5)
                .images(src.images(GOBLET_IMG)?),
            Exercise::new("Push-up con protraction", 1)
                .description("Flexion normal. Al llegar arriba, empuja EXTRA redondeando la espalda alta y separando omoplatos. Activa el serrato anterior.")
                .icon(STRENGTH)
                .sets(3, 60)
                .rest_after(60)
                .reps(12, 4)
                .images(src.images(PUSH_UP_IMG)?),
            Exercise::new("Remo con cable", 2)
                .description("Sentado en maquina de remo. Agarre neutro. Tira codos hacia atras juntando escapulas. Torso erguido. Excentrica 2-3 segundos.")
                .icon(STRENGTH)
                .sets(3, 60)
                .rest_after(60)
                .reps(15, 4)
                .images(src.images("1729-m-crop.png")?),
            Exercise::new("Bird-dog", 3)
                .description("En cuadrupedia. Extiende un brazo al frente y pierna contraria hacia atras. Manten 3 segundos con espalda plana. Alterna.")
                .icon(CORE)
                .sets(3, 30)
                .rest_after(60)
                .reps(10, 6)
                .images(src.images("https://spotebi.com/wp-content/uploads/2014/10/bird-dogs-exercise-illustration.jpg")?),
            Exercise::new("Plancha lateral", 4)
                .duration(25)
                .description("Apoyado sobre antebrazo y lateral del pie. Cuerpo en linea recta. No dejes caer la cadera. Manten respirando normalmente.")
                .icon(CORE)
                .sets(3, 30)
                .rest_after(60)
                .images(src.images("https://spotebi.com/wp-content/uploads/2014/10/side-plank-exercise-illustration.jpg")?),
            Exercise::new("YTW en prono", 5)
                .description("Tumbado boca abajo. Forma Y (brazos al frente), T (brazos a los lados), W (codos flexionados con rotacion externa). Sin peso al principio.")
                .icon(STRENGTH)
                .sets(3, 45)
                .rest_after(60)
                .reps(8, 5)
                .images(src.images("https://assets.caliverse.app/eyJidWNrZXQiOiJjYWxpc3RoZW5pY3MtaGFubmliYWwiLCJrZXkiOiJpbWFnZXNcL2V4ZXJjaXNlc1wvLTYxZjkxYTUyZWQwMmEucG5nIiwiZWRpdHMiOnsicmVzaXplIjp7IndpZHRoIjozNTAsImhlaWdodCI6MzUwLCJmaXQiOiJjb3ZlciJ9fX0=")?),
            Exercise::new("Flexiones cervicales profundas", 6)
                .description("Tumbado boca arriba. Gesto suave de asentir con la barbilla hacia el pecho sin levantar la cabeza del suelo. Manten 10 segundos.")
                .icon(COOLDOWN)
                .sets(3, 15)
                .rest_after(60)
                .reps(12, 10)
                .images(src.images("https://static1.squarespace.com/static/5f5e8592d2b0854b18af6975/5fb7c850d4788b5df8d8af32/5fb924738aa7f2271d70b581/1687452938720/Supine+Chin+Tuck.jpg?format=1500w")?),
            Exercise::new("Extension toracica con fitball", 7)
                .duration(38)
                .description("Siéntate delante del fitball. Apoya espalda alta sobre la pelota. Lleva brazos por encima de la cabeza y dejate caer hacia atras. Respira profundo.")
                .icon(FLEXIBILITY)
                .sets(3, 15)
                .rest_after(0)
                .images(src.images("https://deporteyconsciencia.com/wp-content/uploads/2020/06/Estiramiento-con-fitball.jpg")?),
        ],
    ))
}

fn phase2_mobility<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 2 - Movilidad diaria",
        vec![
            Exercise::new("Foam roller toracico", 0)
                .duration(120)
                .description("Rodillo en zona toracica. Rueda lentamente. En puntos tensos, haz 3-4 extensiones.")
                .icon(COOLDOWN)
                .images(src.images(FOAM_ROLLER_IMG)?)
                .rest_after(10),
            Exercise::new("Estiramiento flexores de cadera", 1)
                .duration(45)
                .description("Rodilla trasera en el suelo. Avanza cadera hacia delante apretando gluteo trasero. No arquees lumbar.")
                .icon(FLEXIBILITY)
                .rest_after(10)
                .images(src.images(HIP_FLEXOR_IMG)?),
            Exercise::new("Estiramiento pectoral en puerta", 2)
                .duration(30)
                .description("Marco de puerta, antebrazos en laterales, codos a 90 grados. Avanza torso.")
                .icon(FLEXIBILITY)
                .rest_after(10)
                .images(src.images(CHEST_STRETCH_IMG)?),
            Exercise::new("Chin tucks", 3)
                .description("De pie o sentado. Lleva barbilla hacia atras. Manten 5 segundos.")
                .icon(COOLDOWN)
                .reps(10, 5)
                .rest_after(10)
                .images(src.images(CHIN_TUCK_IMG)?),
            Exercise::new("Rotacion toracica", 4)
                .description("En cuadrupedia. Mano en la nuca. Rota abriendo el codo al techo. Alterna lados.")
                .icon(FLEXIBILITY)
                .reps(10, 5)
                .rest_after(0),
        ],
    ))
}

fn phase3_posterior<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 3 - Dia A (Cadena posterior)",
        vec![
            Exercise::new("Peso muerto rumano con barra", 0)
                .description("Progresion a barra. Mismo patron de bisagra. Agarre prono o mixto. Baja hasta media espinilla. Espalda neutra.")
                .icon(STRENGTH)
                .sets(4, 90)
                .rest_after(60)
                .reps(10, 5)
                .images(src.images(ROMANIAN_DEADLIFT_IMG)?),
            Exercise::new("Hip thrust con barra", 1)
                .description("Mas carga que Fase 2. Pausa de 2 segundos arriba. Objetivo: llegar a peso corporal en barra.")
                .icon(STRENGTH)
                .sets(4, 90)
                .rest_after(60)
                .reps(10, 5)
                .images(src.images(HIP_THRUST_IMG)?),
            Exercise::new("Pallof press rotacional", 2)
                .description("Mismo Pallof press pero al extender brazos anade rotacion controlada del torso alejandote del punto de anclaje.")
                .icon(CORE)
                .sets(3, 45)
                .rest_after(60)
                .reps(10, 5)
                .images(src.images(PALLOF_IMG)?),
            Exercise::new("Face pull + rotacion externa", 3)
                .description("Tira cuerda hacia la cara y rota punos hacia arriba hasta antebrazos verticales. Manten 2 segundos.")
                .icon(STRENGTH)
                .sets(3, 45)
                .rest_after(60)
                .reps(15, 4)
                .images(src.images(FACE_PULL_IMG)?),
            Exercise::new("Plancha con transferencia de peso", 4)
                .duration(38)
                .description("Plancha frontal. Alterna levantando una mano (toca hombro contrario) sin que el cuerpo rote ni la cadera se hunda.")
                .icon(CORE)
                .sets(3, 45)
                .rest_after(60)
                .images(src.images("https://spotebi.com/wp-content/uploads/2016/03/plank-shoulder-tap-exercise-illustration-spotebi.jpg")?),
            Exercise::new("Pull-ups (progresion de volumen)", 5)
                .description("Misma tecnica con enfasis en depresion escapular y excentrica lenta. Objetivo: 4x10 limpias.")
                .icon(STRENGTH)
                .sets(4, 90)
                .rest_after(0)
                .reps(10, 6)
                .images(src.images(PULL_UP_IMG)?),
        ],
    ))
}

fn phase3_anterior<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 3 - Dia B (Cadena anterior)",
        vec![
            Exercise::new("Sentadilla goblet (pesada)", 0)
                .description("Misma tecnica con mas carga. Si la mancuerna se queda corta, pasa a front squat o anade pausa de 3 segundos abajo.")
                .icon(STRENGTH)
                .sets(4, 60)
                .rest_after(60)
                .reps(12, 5)
                .images(src.images(GOBLET_IMG)?),
            Exercise::new("Push-up con protraction (pies elevados)", 1)
                .description("Push-up plus con pies en banco. Mantén protraccion escapular al final de cada rep.")
                .icon(STRENGTH)
                .sets(3, 60)
                .rest_after(60)
                .reps(15, 4)
                .images(src.images(PUSH_UP_IMG)?),
            Exercise::new("Remo invertido (TRX o barra baja)", 2)
                .description("Cuelga de barra baja o TRX. Tira pecho hacia barra apretando escapulas al final. Baja controlado.")
                .icon(STRENGTH)
                .sets(3, 60)
                .rest_after(60)
                .reps(12, 5)
                .images(src.images("1441-m-crop.png")?),
            Exercise::new("Movilidad toracica con rotacion", 3)
                .description("En cuadrupedia. Mano en la nuca. Rota torso llevando codo al techo. Vuelve pasando codo por debajo del cuerpo.")
                .icon(FLEXIBILITY)
                .sets(2, 15)
                .rest_after(30)
                .reps(10, 5)
                .images(src.images("https://spotebi.com/wp-content/uploads/2017/11/thread-the-needle-pose-parsva-balasana-spotebi.jpg")?),
            Exercise::new("Estiramiento dinamico flexores de cadera", 4)
                .description("Zancada larga hacia delante. En posicion baja, levanta brazo del lado de pierna trasera al techo. Alterna.")
                .icon(FLEXIBILITY)
                .sets(2, 15)
                .rest_after(0)
                .reps(10, 5)
                .images(src.images(HIP_FLEXOR_IMG)?),
        ],
    ))
}

fn phase3_mobility<S: ImageSource>(src: &mut S) -> Result<Routine> {
    Ok(Routine::new(
        "Fase 3 - Movilidad diaria",
        vec![
            Exercise::new("Foam roller toracico", 0)
                .duration(120)
                .description("Rodillo en zona toracica. Rueda lentamente arriba y abajo.")
                .icon(COOLDOWN)
                .images(src.images(FOAM_ROLLER_IMG)?)
                .rest_after(10),
            Exercise::new("Estiramiento flexores de cadera", 1)
                .duration(30)
                .description("Rodilla trasera en el suelo. Avanza cadera apretando gluteo.")
                .icon(FLEXIBILITY)
                .rest_after(10)
                .images(src.images(HIP_FLEXOR_IMG)?),
            Exercise::new("Chin tucks", 2)
                .description("Lleva barbilla hacia atras. Manten 5 segundos.")
                .icon(COOLDOWN)
                .reps(10, 5)
                .rest_after(10)
                .images(src.images(CHIN_TUCK_IMG)?),
            Exercise::new("Rotacion toracica", 3)
                .description("En cuadrupedia. Mano en la nuca. Rota codo al techo. Alterna.")
                .icon(FLEXIBILITY)
                .reps(10, 5)
                .rest_after(10),
            Exercise::new("Respiracion diafragmatica", 4)
                .duration(180)
                .description("Tumbado boca arriba. Mano en abdomen. Solo se mueve el abdomen. Inspira 4 segundos, espira 6 segundos.")
                .icon(COOLDOWN)
                .rest_after(0),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::is_remote;

    /// Answers every reference with one fake image, or none for remote URLs
    /// when `offline` is set. Records what was asked for.
    #[derive(Default)]
    struct StubSource {
        offline: bool,
        requested: Vec<String>,
    }

    impl ImageSource for StubSource {
        fn images(&mut self, reference: &str) -> Result<Vec<String>> {
            self.requested.push(reference.to_string());
            if self.offline && is_remote(reference) {
                Ok(Vec::new())
            } else {
                Ok(vec![format!("img:{}", reference)])
            }
        }
    }

    fn plan() -> Plan {
        build_plan(&mut StubSource::default()).unwrap()
    }

    #[test]
    fn builds_seven_routines_in_order() {
        let names: Vec<_> = plan().routines.into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Fase 1 - Movilidad y activacion",
                "Fase 2 - Dia A (Cadena posterior)",
                "Fase 2 - Dia B (Cadena anterior)",
                "Fase 2 - Movilidad diaria",
                "Fase 3 - Dia A (Cadena posterior)",
                "Fase 3 - Dia B (Cadena anterior)",
                "Fase 3 - Movilidad diaria",
            ]
        );
    }

    #[test]
    fn counts_match_dataset() {
        let plan = plan();
        let per_routine: Vec<_> = plan.routines.iter().map(|r| r.exercises.len()).collect();
        assert_eq!(per_routine, vec![9, 5, 8, 5, 6, 5, 5]);
        assert_eq!(plan.exercise_count(), 43);
        // three exercises carry no illustration
        assert_eq!(plan.image_count(), 40);
    }

    #[test]
    fn sort_order_matches_position() {
        for routine in plan().routines {
            for (i, exercise) in routine.exercises.iter().enumerate() {
                assert_eq!(exercise.sort_order as usize, i, "{}", exercise.name);
            }
        }
    }

    #[test]
    fn single_set_exercises_have_no_rest_between_sets() {
        for routine in plan().routines {
            for exercise in routine.exercises.iter().filter(|e| e.sets == 1) {
                assert_eq!(exercise.rest_seconds, 0, "{}", exercise.name);
            }
        }
    }

    #[test]
    fn routines_share_schedule_flags() {
        for routine in plan().routines {
            assert!(!routine.is_default);
            assert!(!routine.is_active);
            assert_eq!(routine.interval_minutes, 45);
        }
    }

    #[test]
    fn resolves_each_reference_in_construction_order() {
        let mut src = StubSource::default();
        build_plan(&mut src).unwrap();
        assert_eq!(src.requested.len(), 40);
        assert_eq!(src.requested[0], FOAM_ROLLER_IMG);
        assert_eq!(src.requested[1], HIP_FLEXOR_IMG);
        assert_eq!(src.requested.last().unwrap(), CHIN_TUCK_IMG);
    }

    #[test]
    fn remote_failures_leave_empty_image_lists() {
        let plan = build_plan(&mut StubSource { offline: true, ..Default::default() }).unwrap();
        let first = &plan.routines[0].exercises;
        assert_eq!(first[0].images, vec![format!("img:{}", FOAM_ROLLER_IMG)]);
        assert!(first[1].images.is_empty());
    }

    #[test]
    fn spot_check_exercise_values() {
        let plan = plan();
        let chin_tucks = &plan.routines[0].exercises[3];
        assert_eq!(chin_tucks.sets, 3);
        assert_eq!(chin_tucks.rest_seconds, 15);
        assert_eq!(chin_tucks.rest_after_seconds, 15);
        assert_eq!(chin_tucks.duration_seconds, 0);
        assert!(chin_tucks.is_rep_based());

        let side_plank = &plan.routines[2].exercises[4];
        assert_eq!(side_plank.name, "Plancha lateral");
        assert_eq!(side_plank.duration_seconds, 25);
        assert!(side_plank.repetitions.is_none());

        let breathing = &plan.routines[6].exercises[4];
        assert_eq!(breathing.duration_seconds, 180);
        assert_eq!(breathing.sets, 1);
        assert_eq!(breathing.rest_after_seconds, 0);
        assert!(breathing.images.is_empty());
    }
}
