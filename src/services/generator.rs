// src/services/generator.rs
//
// Núcleo puro da geração de escala semanal. Não toca no banco: recebe os
// dados já carregados (horário de funcionamento, elenco com disponibilidade,
// folgas aprovadas, templates de turno) e devolve os turnos planejados.
// O sorteio é injetado via `rand::Rng` para os testes serem determinísticos.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::schedule::NewShift;

// Um template de turno: janela fixa de horário + quantas pessoas de cada
// função ele exige. A ordem do Vec é a ordem de preenchimento, e ela importa:
// quando o elenco é escasso, os primeiros pares (função, vagas) levam a
// melhor parte do pool do dia.
#[derive(Debug, Clone)]
pub struct ShiftTemplate {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub required_roles: Vec<(String, u32)>,
}

// Horário de funcionamento de um dia da semana (0 = domingo ... 6 = sábado).
#[derive(Debug, Clone, Copy)]
pub struct OpenWindow {
    pub day_of_week: i16,
    pub is_open: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

// Janela de disponibilidade já filtrada (apenas as vigentes).
#[derive(Debug, Clone, Copy)]
pub struct DayWindow {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// Funcionário escalável: identidade, função e suas janelas.
#[derive(Debug, Clone)]
pub struct RosterEmployee {
    pub id: Uuid,
    pub position: String,
    pub availability: Vec<DayWindow>,
}

// Folga aprovada; datas inclusivas nas duas pontas.
#[derive(Debug, Clone, Copy)]
pub struct LeaveInterval {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).expect("horário de template inválido")
}

// Os três templates padrão da casa (manhã, almoço e jantar), com as mesmas
// janelas e quotas de sempre. São configuração injetada no AppState; o
// algoritmo em si não conhece nenhum deles.
pub fn default_templates() -> Vec<ShiftTemplate> {
    vec![
        ShiftTemplate {
            start_time: hm(7, 0),
            end_time: hm(15, 0),
            required_roles: vec![
                ("Chef".into(), 1),
                ("Line Cook".into(), 2),
                ("Dishwasher".into(), 1),
            ],
        },
        ShiftTemplate {
            start_time: hm(11, 0),
            end_time: hm(19, 0),
            required_roles: vec![
                ("Server".into(), 3),
                ("Host".into(), 1),
                ("Bartender".into(), 1),
                ("Line Cook".into(), 2),
                ("Dishwasher".into(), 1),
            ],
        },
        ShiftTemplate {
            start_time: hm(15, 0),
            end_time: hm(23, 0),
            required_roles: vec![
                ("Chef".into(), 1),
                ("Server".into(), 4),
                ("Host".into(), 1),
                ("Bartender".into(), 2),
                ("Line Cook".into(), 2),
                ("Dishwasher".into(), 1),
            ],
        },
    ]
}

// Normaliza qualquer data para o domingo que abre a semana dela.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

// Planeja a semana inteira. Regras, na ordem em que pesam:
//  - dia sem linha de funcionamento (ou fechado) não recebe turno algum;
//  - template que não cabe dentro do horário do dia é pulado naquele dia;
//  - um funcionário é elegível para (dia, função) se a função bate com a
//    posição dele, a primeira janela dele naquele dia cobre o template por
//    inteiro, nenhuma folga aprovada cobre a data e ele ainda não foi
//    sorteado em nenhuma vaga desta rodada;
//  - cada vaga sorteia uniformemente do pool; pool vazio deixa a vaga em
//    aberto sem erro (subcobertura é silenciosa).
//
// Quem entra em um turno sai do pool da rodada inteira: no máximo um turno
// gerado por funcionário por execução (ver DESIGN.md).
pub fn plan_week<R: Rng>(
    week_start: NaiveDate,
    open_days: &[OpenWindow],
    roster: &[RosterEmployee],
    leaves: &[LeaveInterval],
    templates: &[ShiftTemplate],
    rng: &mut R,
) -> Vec<NewShift> {
    let week_start = start_of_week(week_start);

    let mut planned: Vec<NewShift> = Vec::new();
    let mut assigned: HashSet<Uuid> = HashSet::new();

    for offset in 0..7 {
        let date = week_start + Duration::days(offset);
        let weekday = date.weekday().num_days_from_sunday() as i16;

        let Some(hours) = open_days
            .iter()
            .find(|h| h.day_of_week == weekday && h.is_open)
        else {
            continue;
        };

        for template in templates {
            // O turno precisa caber por inteiro no horário da casa.
            if template.start_time < hours.open_time || template.end_time > hours.close_time {
                continue;
            }

            for (role, required) in &template.required_roles {
                let mut pool: Vec<&RosterEmployee> = roster
                    .iter()
                    .filter(|employee| {
                        employee.position == *role
                            && !assigned.contains(&employee.id)
                            && employee
                                .availability
                                .iter()
                                .find(|w| w.day_of_week == weekday)
                                .is_some_and(|w| {
                                    w.start_time <= template.start_time
                                        && w.end_time >= template.end_time
                                })
                            && !leaves.iter().any(|leave| {
                                leave.user_id == employee.id
                                    && leave.start_date <= date
                                    && date <= leave.end_date
                            })
                    })
                    .collect();

                for _ in 0..*required {
                    if pool.is_empty() {
                        // Quota não preenchida: segue o jogo.
                        break;
                    }
                    let idx = rng.gen_range(0..pool.len());
                    let employee = pool.swap_remove(idx);
                    assigned.insert(employee.id);
                    planned.push(NewShift {
                        user_id: employee.id,
                        date,
                        start_time: template.start_time,
                        end_time: template.end_time,
                    });
                }
            }
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    // Semana com domingo em 2025-06-01.
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn open_all_week(open: NaiveTime, close: NaiveTime) -> Vec<OpenWindow> {
        (0..7)
            .map(|d| OpenWindow {
                day_of_week: d,
                is_open: true,
                open_time: open,
                close_time: close,
            })
            .collect()
    }

    fn employee(position: &str, windows: &[(i16, NaiveTime, NaiveTime)]) -> RosterEmployee {
        RosterEmployee {
            id: Uuid::new_v4(),
            position: position.into(),
            availability: windows
                .iter()
                .map(|&(d, s, e)| DayWindow {
                    day_of_week: d,
                    start_time: s,
                    end_time: e,
                })
                .collect(),
        }
    }

    fn one_server_template(required: u32) -> Vec<ShiftTemplate> {
        vec![ShiftTemplate {
            start_time: hm(11, 0),
            end_time: hm(19, 0),
            required_roles: vec![("Server".into(), required)],
        }]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn closed_week_produces_no_shifts() {
        let mut hours = open_all_week(hm(7, 0), hm(23, 0));
        for h in &mut hours {
            h.is_open = false;
        }
        let roster = vec![employee("Server", &[(1, hm(0, 0), hm(23, 59))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn missing_operating_day_counts_as_closed() {
        // Só segunda aberta; todos os outros dias sem linha.
        let hours = vec![OpenWindow {
            day_of_week: 1,
            is_open: true,
            open_time: hm(7, 0),
            close_time: hm(23, 0),
        }];
        let roster = vec![employee(
            "Server",
            &(0..7).map(|d| (d, hm(9, 0), hm(20, 0))).collect::<Vec<_>>(),
        )];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].date, sunday() + Duration::days(1));
    }

    #[test]
    fn template_that_does_not_fit_operating_hours_is_skipped() {
        // Casa abre 12:00-18:00; o template 11:00-19:00 transborda dos dois lados.
        let hours = open_all_week(hm(12, 0), hm(18, 0));
        let roster = vec![employee("Server", &[(1, hm(0, 0), hm(23, 59))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn availability_window_too_short_excludes_employee() {
        // Disponível segunda 09:00-17:00; o template vai até 19:00.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(17, 0))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn covering_window_schedules_exactly_once() {
        // Disponibilidade 09:00-20:00 cobre o template 11:00-19:00.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(20, 0))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].user_id, roster[0].id);
        assert_eq!(plan[0].date, sunday() + Duration::days(1));
        assert_eq!(plan[0].start_time, hm(11, 0));
        assert_eq!(plan[0].end_time, hm(19, 0));
    }

    #[test]
    fn understaffed_role_fills_what_it_can_without_error() {
        // Quota de 3 Servers, só 1 elegível: sai 1 turno e nada explode.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(20, 0))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(3), &mut rng());
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn approved_time_off_blocks_the_whole_day() {
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(20, 0))])];
        let monday = sunday() + Duration::days(1);
        let leaves = vec![LeaveInterval {
            user_id: roster[0].id,
            start_date: monday,
            end_date: monday,
        }];

        let plan = plan_week(sunday(), &hours, &roster, &leaves, &one_server_template(1), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn time_off_outside_the_date_does_not_block() {
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(20, 0))])];
        let leaves = vec![LeaveInterval {
            user_id: roster[0].id,
            start_date: sunday() + Duration::days(3),
            end_date: sunday() + Duration::days(4),
        }];

        let plan = plan_week(sunday(), &hours, &roster, &leaves, &one_server_template(1), &mut rng());
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn position_must_match_the_role_slot() {
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Chef", &[(1, hm(0, 0), hm(23, 59))])];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn employee_is_assigned_at_most_once_per_run() {
        // Disponível a semana toda, vaga todos os dias: mesmo assim só entra
        // uma vez, porque quem é sorteado sai do pool da rodada.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let windows: Vec<_> = (0..7).map(|d| (d, hm(9, 0), hm(20, 0))).collect();
        let roster = vec![employee("Server", &windows)];

        let plan = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn earlier_template_wins_the_scarce_pool() {
        // Dois templates no mesmo dia disputando o único Server: o primeiro
        // da lista leva.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(7, 0), hm(23, 0))])];
        let templates = vec![
            ShiftTemplate {
                start_time: hm(7, 0),
                end_time: hm(15, 0),
                required_roles: vec![("Server".into(), 1)],
            },
            ShiftTemplate {
                start_time: hm(15, 0),
                end_time: hm(23, 0),
                required_roles: vec![("Server".into(), 1)],
            },
        ];

        let plan = plan_week(sunday(), &hours, &roster, &[], &templates, &mut rng());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].start_time, hm(7, 0));
    }

    #[test]
    fn week_start_is_normalized_to_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(start_of_week(wednesday), sunday());
        assert_eq!(start_of_week(sunday()), sunday());

        // Planejar a partir da quarta dá o mesmo resultado que a partir do domingo.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let roster = vec![employee("Server", &[(1, hm(9, 0), hm(20, 0))])];
        let a = plan_week(wednesday, &hours, &roster, &[], &one_server_template(1), &mut rng());
        let b = plan_week(sunday(), &hours, &roster, &[], &one_server_template(1), &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_rng_makes_the_plan_reproducible() {
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let windows: Vec<_> = (0..7).map(|d| (d, hm(7, 0), hm(23, 0))).collect();
        let roster: Vec<_> = (0..10).map(|_| employee("Server", &windows)).collect();
        let templates = one_server_template(3);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = plan_week(sunday(), &hours, &roster, &[], &templates, &mut rng_a);
        let b = plan_week(sunday(), &hours, &roster, &[], &templates, &mut rng_b);
        assert_eq!(a, b);
    }

    // Verificação de todas as propriedades observáveis do plano, usada pelo
    // teste randomizado abaixo.
    fn assert_plan_invariants(
        plan: &[NewShift],
        week_start: NaiveDate,
        open_days: &[OpenWindow],
        roster: &[RosterEmployee],
        leaves: &[LeaveInterval],
        templates: &[ShiftTemplate],
    ) {
        let by_id: HashMap<Uuid, &RosterEmployee> =
            roster.iter().map(|e| (e.id, e)).collect();
        let mut seen: HashSet<(Uuid, NaiveDate)> = HashSet::new();

        for shift in plan {
            // Dentro da semana gerada.
            assert!(shift.date >= week_start && shift.date < week_start + Duration::days(7));

            let weekday = shift.date.weekday().num_days_from_sunday() as i16;
            let hours = open_days
                .iter()
                .find(|h| h.day_of_week == weekday && h.is_open)
                .expect("turno gerado em dia fechado");

            // Horários vêm de um template válido e cabem no expediente.
            let template = templates
                .iter()
                .find(|t| t.start_time == shift.start_time && t.end_time == shift.end_time)
                .expect("turno sem template correspondente");
            assert!(template.start_time >= hours.open_time);
            assert!(template.end_time <= hours.close_time);

            // O escalado cobre a função e a janela do template.
            let employee = by_id[&shift.user_id];
            assert!(template
                .required_roles
                .iter()
                .any(|(role, _)| *role == employee.position));
            let window = employee
                .availability
                .iter()
                .find(|w| w.day_of_week == weekday)
                .expect("turno sem janela de disponibilidade");
            assert!(window.start_time <= shift.start_time);
            assert!(window.end_time >= shift.end_time);

            // Nenhuma folga aprovada cobre a data.
            assert!(!leaves.iter().any(|l| {
                l.user_id == shift.user_id
                    && l.start_date <= shift.date
                    && shift.date <= l.end_date
            }));

            // No máximo um turno por funcionário por data.
            assert!(seen.insert((shift.user_id, shift.date)));
        }
    }

    #[test]
    fn random_rosters_respect_every_invariant() {
        // Elenco variado, templates reais, folgas espalhadas; roda com vários
        // seeds e confere as propriedades uma a uma.
        let hours = open_all_week(hm(7, 0), hm(23, 0));
        let templates = default_templates();

        let positions = ["Chef", "Server", "Host", "Bartender", "Line Cook", "Dishwasher"];
        let mut roster = Vec::new();
        for (i, position) in positions.iter().copied().cycle().take(24).enumerate() {
            // Janelas alternadas: nem todo mundo cobre todo template.
            let windows: Vec<_> = (0..7)
                .filter(|d| (d + i as i16) % 3 != 0)
                .map(|d| {
                    if i % 2 == 0 {
                        (d, hm(6, 0), hm(23, 30))
                    } else {
                        (d, hm(10, 0), hm(19, 30))
                    }
                })
                .collect();
            roster.push(employee(position, &windows));
        }

        let leaves: Vec<_> = roster
            .iter()
            .step_by(5)
            .map(|e| LeaveInterval {
                user_id: e.id,
                start_date: sunday() + Duration::days(2),
                end_date: sunday() + Duration::days(3),
            })
            .collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan_week(sunday(), &hours, &roster, &leaves, &templates, &mut rng);
            assert_plan_invariants(&plan, sunday(), &hours, &roster, &leaves, &templates);
        }
    }

    #[test]
    fn default_templates_match_the_house_rules() {
        let templates = default_templates();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0].start_time, hm(7, 0));
        assert_eq!(templates[2].end_time, hm(23, 0));
        // O turno do jantar é o mais pesado: 11 pessoas.
        let total: u32 = templates[2].required_roles.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 11);
    }
}
