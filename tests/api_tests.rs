//! Tests end-to-end sobre el router real
//!
//! Cada test levanta su propio estado con bases SQLite en un directorio
//! temporal y ejercita la API completa: registro, login, aislamiento por
//! empresa e importación masiva.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use flota_transporte::config::environment::EnvironmentConfig;
use flota_transporte::database::connection::create_primary_pool;
use flota_transporte::routes::create_api_router;
use flota_transporte::services::jwt_service::{JwtService, TipoPrincipal};
use flota_transporte::state::AppState;

const JWT_SECRET: &str = "secreto_de_test";

async fn create_test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration_minutes: 30,
        data_dir: dir.path().to_str().unwrap().to_string(),
        cors_origins: vec![],
    };

    let pool = create_primary_pool(dir.path()).await.unwrap();
    let state = AppState::new(pool, config);
    (create_api_router(state), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn multipart_csv_request(path: &str, token: &str, csv: &str) -> Request<Body> {
    let boundary = "api-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"trayectos.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = boundary,
        csv = csv,
    );

    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn registrar_empresa(app: &Router, nombre: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/empresas/",
            None,
            &json!({
                "nombre": nombre,
                "email": email,
                "nit": "900123456",
                "password": "secreto123",
            }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email, password
        )))
        .unwrap();
    send(app, request).await
}

async fn token_de_empresa(app: &Router, nombre: &str, email: &str) -> String {
    let (status, _) = registrar_empresa(app, nombre, email).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = login(app, email, "secreto123").await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = create_test_app().await;
    let (status, body) = send(&app, get_request("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_registro_duplicado_responde_400() {
    let (app, _dir) = create_test_app().await;

    let (status, _) = registrar_empresa(&app, "Transportes A", "a@x.com").await;
    assert_eq!(status, StatusCode::OK);

    // Mismo email con otra contraseña: debe rechazarse sin crear nada
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/empresas/",
            None,
            &json!({
                "nombre": "Transportes B",
                "email": "a@x.com",
                "nit": "900765432",
                "password": "otra_clave",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email ya registrado");

    // La empresa original sigue pudiendo entrar con su contraseña
    let (status, _) = login(&app, "a@x.com", "secreto123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_registro_provisiona_base_de_empresa() {
    let (app, dir) = create_test_app().await;

    let (status, _) = registrar_empresa(&app, "Flota Norte", "Flota.Norte@x.com").await;
    assert_eq!(status, StatusCode::OK);

    assert!(dir.path().join("empresa_flota_norte.db").exists());
}

#[tokio::test]
async fn test_login_con_credenciales_invalidas() {
    let (app, _dir) = create_test_app().await;
    registrar_empresa(&app, "Transportes A", "a@x.com").await;

    let (status, _) = login(&app, "a@x.com", "clave_equivocada").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = login(&app, "nadie@x.com", "secreto123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_exitoso_devuelve_bearer() {
    let (app, _dir) = create_test_app().await;
    registrar_empresa(&app, "Transportes A", "a@x.com").await;

    let (status, body) = login(&app, "a@x.com", "secreto123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user_type"], "empresa");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn test_request_sin_token_responde_401_con_challenge() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/vehiculos/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_token_basura_responde_401() {
    let (app, _dir) = create_test_app().await;

    let (status, _) = send(&app, get_request("/vehiculos/", Some("no-es-un-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_expirado_responde_401() {
    let (app, _dir) = create_test_app().await;
    registrar_empresa(&app, "Transportes A", "a@x.com").await;

    // Token firmado con el secreto correcto pero ya vencido
    let jwt = JwtService::new(JWT_SECRET, 30);
    let vencido = jwt
        .issue(
            "a@x.com",
            TipoPrincipal::Empresa,
            1,
            None,
            Some(chrono::Duration::seconds(-5)),
        )
        .unwrap();

    let (status, _) = send(&app, get_request("/vehiculos/", Some(&vencido))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_de_principal_inexistente_responde_401() {
    let (app, _dir) = create_test_app().await;

    let jwt = JwtService::new(JWT_SECRET, 30);
    let token = jwt
        .issue("fantasma@x.com", TipoPrincipal::Empresa, 99, None, None)
        .unwrap();

    let (status, _) = send(&app, get_request("/vehiculos/", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_aislamiento_entre_empresas() {
    let (app, _dir) = create_test_app().await;

    let token_a = token_de_empresa(&app, "Transportes A", "a@x.com").await;
    let token_b = token_de_empresa(&app, "Transportes B", "b@x.com").await;

    // La empresa A registra un vehículo
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/vehiculos/",
            Some(&token_a),
            &json!([{
                "marca": "Mercedes",
                "placa": "ABC123",
                "modelo": "Sprinter",
                "lateral": "L-01",
                "anio_fabricacion": 2020,
                "capacidad_pasajeros": 19,
                "estado_operativo": "activo",
            }]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A lo ve; B no ve nada
    let (_, body_a) = send(&app, get_request("/vehiculos/", Some(&token_a))).await;
    assert_eq!(body_a.as_array().unwrap().len(), 1);

    let (status, body_b) = send(&app, get_request("/vehiculos/", Some(&token_b))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body_b.as_array().unwrap().len(), 0);

    // La llave natural de A tampoco existe en el alcance de B
    let (status, _) = send(&app, get_request("/vehiculo/ABC123", Some(&token_b))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get_request("/vehiculo/ABC123", Some(&token_a))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["placa"], "ABC123");
}

#[tokio::test]
async fn test_crud_de_vehiculo() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/vehiculos/",
            Some(&token),
            &json!([{
                "marca": "Chevrolet",
                "placa": "XYZ789",
                "modelo": "NPR",
                "lateral": "L-02",
                "anio_fabricacion": 2018,
                "capacidad_pasajeros": 30,
                "estado_operativo": "activo",
            }]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"][0]["id"].as_str().unwrap().to_string();

    // PATCH parcial: solo cambia el estado operativo
    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/vehiculo/{}", id),
            Some(&token),
            &json!({ "estado_operativo": "taller" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estado_operativo"], "taller");
    assert_eq!(body["data"]["placa"], "XYZ789");

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/vehiculo/{}", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get_request("/vehiculo/XYZ789", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lote_con_cedula_duplicada_no_inserta_nada() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let conductor = |cedula: &str| {
        json!({
            "nombre": "Juan Pérez",
            "cedula": cedula,
            "licencia": "C2",
            "telefono": "3001234567",
            "estado": "activo",
        })
    };

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/conductores/",
            Some(&token),
            &json!([conductor("11111111"), conductor("11111111")]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rollback completo: ninguna fila del lote quedó insertada
    let (_, body) = send(&app, get_request("/conductores/", Some(&token))).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_ciclo_de_vida_de_usuario() {
    let (app, _dir) = create_test_app().await;
    let token_empresa = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/usuarios/",
            Some(&token_empresa),
            &json!({
                "email": "agente@x.com",
                "username": "agente1",
                "password": "clave_agente",
                "rol": "agente",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let usuario_id = body["data"]["id"].as_i64().unwrap();

    // El usuario entra con su propia cuenta
    let (status, body) = login(&app, "agente@x.com", "clave_agente").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_type"], "usuario");
    assert_eq!(body["role"], "agente");
    let token_agente = body["access_token"].as_str().unwrap().to_string();

    // El agente opera la flota de su empresa...
    let (status, _) = send(&app, get_request("/vehiculos/", Some(&token_agente))).await;
    assert_eq!(status, StatusCode::OK);

    // ...pero no gestiona usuarios
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/usuarios/",
            Some(&token_agente),
            &json!({
                "email": "otro@x.com",
                "username": "otro",
                "password": "clave_otro",
                "rol": "agente",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Baja lógica del usuario
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/usuario/{}", usuario_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token_empresa))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Su login y su token vigente quedan bloqueados con 403
    let (status, _) = login(&app, "agente@x.com", "clave_agente").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get_request("/vehiculos/", Some(&token_agente))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_email_de_usuario_unico_en_todo_el_sistema() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    // El email de otra empresa no puede reutilizarse para un usuario
    registrar_empresa(&app, "Transportes B", "b@x.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/usuarios/",
            Some(&token),
            &json!({
                "email": "b@x.com",
                "username": "intruso",
                "password": "clave123",
                "rol": "agente",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email ya registrado");
}

#[tokio::test]
async fn test_trayecto_con_horario_invertido_se_rechaza() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/trayectos/",
            Some(&token),
            &json!({
                "fecha": "2025-06-10",
                "hora_salida": "10:00:00",
                "hora_llegada": "08:00:00",
                "cantidad_pasajeros": 12,
                "kilometraje": 40,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disponibilidad_de_conductor() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/conductores/",
            Some(&token),
            &json!([{
                "nombre": "Juan Pérez",
                "cedula": "22222222",
                "licencia": "C2",
                "telefono": "3001234567",
                "estado": "activo",
            }]),
        ),
    )
    .await;
    let conductor_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let trayecto = |salida: &str, llegada: &str| {
        json!({
            "fecha": "2025-06-10",
            "hora_salida": salida,
            "hora_llegada": llegada,
            "cantidad_pasajeros": 12,
            "kilometraje": 40,
            "conductor_id": conductor_id,
        })
    };

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/trayectos/",
            Some(&token),
            &trayecto("08:00:00", "10:00:00"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Cruce de horarios con el mismo conductor: rechazado
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/trayectos/",
            Some(&token),
            &trayecto("09:30:00", "11:00:00"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Intervalos que solo se tocan: permitido
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/trayectos/",
            Some(&token),
            &trayecto("10:00:00", "12:00:00"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_importacion_masiva_reporta_filas_malas() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let csv = "fecha;hora_salida;hora_llegada;cantidad_pasajeros;kilometraje;observaciones;ruta_id;conductor_id;vehiculo_id\n\
               2025-06-10;08:00;09:00;10;35;;;;\n\
               10/06/2025;10:00;11:00;10;35;;;;\n\
               2025-06-11;08:00;09:00;12;35;sin novedad;;;\n";

    let (status, body) = send(&app, multipart_csv_request("/trayectos/bulk", &token, csv)).await;
    assert_eq!(status, StatusCode::OK);

    // La fila 2 trae la fecha en formato inválido; las otras dos entran
    assert_eq!(body["trayectos_insertados"], 2);
    let errores = body["errores"].as_array().unwrap();
    assert_eq!(errores.len(), 1);
    assert!(errores[0].as_str().unwrap().contains("Fila 2"));

    let (_, listado) = send(&app, get_request("/trayectos/", Some(&token))).await;
    assert_eq!(listado.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_importacion_masiva_respeta_disponibilidad_dentro_del_lote() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/conductores/",
            Some(&token),
            &json!([{
                "nombre": "Ana Gómez",
                "cedula": "33333333",
                "licencia": "C2",
                "telefono": "3007654321",
                "estado": "activo",
            }]),
        ),
    )
    .await;
    let conductor_id = body["data"][0]["id"].as_str().unwrap().to_string();

    // Dos filas del mismo lote se pisan entre sí para el mismo conductor
    let csv = format!(
        "fecha;hora_salida;hora_llegada;cantidad_pasajeros;kilometraje;observaciones;ruta_id;conductor_id;vehiculo_id\n\
         2025-06-10;08:00;10:00;10;35;;;{c};\n\
         2025-06-10;09:00;11:00;10;35;;;{c};\n",
        c = conductor_id,
    );

    let (status, body) = send(&app, multipart_csv_request("/trayectos/bulk", &token, &csv)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trayectos_insertados"], 1);
    assert_eq!(body["errores"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trayectos_activos_solo_desde_hoy() {
    let (app, _dir) = create_test_app().await;
    let token = token_de_empresa(&app, "Transportes A", "a@x.com").await;

    let manana = (chrono::Local::now().date_naive() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();

    for fecha in ["2020-01-01", manana.as_str()] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/trayectos/",
                Some(&token),
                &json!({
                    "fecha": fecha,
                    "hora_salida": "08:00:00",
                    "hora_llegada": "09:00:00",
                    "cantidad_pasajeros": 10,
                    "kilometraje": 35,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, todos) = send(&app, get_request("/trayectos/", Some(&token))).await;
    assert_eq!(todos.as_array().unwrap().len(), 2);

    let (_, activos) = send(&app, get_request("/trayectos/activos/", Some(&token))).await;
    let activos = activos.as_array().unwrap();
    assert_eq!(activos.len(), 1);
    assert_eq!(activos[0]["fecha"], manana);
}
