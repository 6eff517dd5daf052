//! Renderers for the nine source artifacts.

use super::{Lines, ModuleSyntax, RenderParams};

const EXPRESS_HANDLER_TYPES: &[&str] = &["Request", "Response", "NextFunction"];

pub(super) fn logger(s: &ModuleSyntax, p: &RenderParams) -> String {
    Lines::default()
        .line(s.import_default("winston", "winston"))
        .blank()
        .lines(&[
            "const logger = winston.createLogger({",
            "  level: process.env.LOG_LEVEL || 'info',",
            "  format: winston.format.combine(",
            "    winston.format.timestamp(),",
            "    winston.format.json()",
            "  ),",
        ])
        .line(format!("  defaultMeta: {{ service: '{}' }},", p.package_name))
        .lines(&["  transports: [new winston.transports.Console()],", "});"])
        .blank()
        .line(s.export_default("logger"))
        .finish()
}

pub(super) fn database(s: &ModuleSyntax, p: &RenderParams) -> String {
    Lines::default()
        .line(s.import_default("mongoose", "mongoose"))
        .line(s.import_local("logger", "../utils/logger"))
        .blank()
        .line(format!(
            "const connectDB = async (){} => {{",
            s.annotate("Promise<void>")
        ))
        .line(format!(
            "  const uri = process.env.DB_URI || 'mongodb://localhost:27017/{}';",
            p.package_name
        ))
        .lines(&[
            "  try {",
            "    await mongoose.connect(uri);",
            "    logger.info('MongoDB connected');",
            "  } catch (error) {",
            "    logger.error('MongoDB connection failed', { error });",
            "    process.exit(1);",
            "  }",
            "};",
        ])
        .blank()
        .line(s.export_default("connectDB"))
        .finish()
}

pub(super) fn swagger(s: &ModuleSyntax, p: &RenderParams) -> String {
    let ext = s.key().source_extension();
    Lines::default()
        .line(s.import_default("swaggerJsdoc", "swagger-jsdoc"))
        .line(s.import_default("swaggerUi", "swagger-ui-express"))
        .maybe(s.import_types(&["Express"], "express"))
        .blank()
        .line("const apiVersion = process.env.API_VERSION || 'v1';")
        .blank()
        .line(format!("const options{} = {{", s.annotate("swaggerJsdoc.Options")))
        .lines(&["  definition: {", "    openapi: '3.0.0',", "    info: {"])
        .line(format!("      title: '{} API',", p.project_name))
        .lines(&["      version: '1.0.0',", "    },", "    servers: ["])
        .line(format!(
            "      {{ url: `http://localhost:${{process.env.PORT || {}}}/api/${{apiVersion}}` }},",
            p.port
        ))
        .lines(&["    ],", "  },"])
        .line(format!("  apis: ['./src/routes/*.{ext}'],"))
        .line("};")
        .blank()
        .line("const swaggerSpec = swaggerJsdoc(options);")
        .blank()
        .line(format!(
            "const setupSwagger = ({}){} => {{",
            s.param("app", "Express"),
            s.annotate("void")
        ))
        .lines(&[
            "  app.use('/api-docs', swaggerUi.serve, swaggerUi.setup(swaggerSpec));",
            "};",
        ])
        .blank()
        .line(s.export_default("setupSwagger"))
        .finish()
}

/// `(req, res, next)` with Express types under TypeScript.
fn handler_params(s: &ModuleSyntax, req: &str, next: &str) -> String {
    [
        s.param(req, "Request"),
        s.param("res", "Response"),
        s.param(next, "NextFunction"),
    ]
    .join(", ")
}

pub(super) fn transaction_id(s: &ModuleSyntax) -> String {
    Lines::default()
        .line(s.import_named(&["v4 as uuidv4"], "uuid"))
        .maybe(s.import_types(EXPRESS_HANDLER_TYPES, "express"))
        .blank()
        .line("const HEADER = 'x-transaction-id';")
        .blank()
        .line(format!(
            "const transactionId = ({}){} => {{",
            handler_params(s, "req", "next"),
            s.annotate("void")
        ))
        .lines(&[
            "  const id = req.header(HEADER) || uuidv4();",
            "  res.locals.transactionId = id;",
            "  res.setHeader(HEADER, id);",
            "  next();",
            "};",
        ])
        .blank()
        .line(s.export_default("transactionId"))
        .finish()
}

pub(super) fn request_logger(s: &ModuleSyntax) -> String {
    Lines::default()
        .line(s.import_local("logger", "../utils/logger"))
        .maybe(s.import_types(EXPRESS_HANDLER_TYPES, "express"))
        .blank()
        .line(format!(
            "const requestLogger = ({}){} => {{",
            handler_params(s, "req", "next"),
            s.annotate("void")
        ))
        .lines(&[
            "  const start = Date.now();",
            "  res.on('finish', () => {",
            "    logger.info('request completed', {",
            "      method: req.method,",
            "      url: req.originalUrl,",
            "      status: res.statusCode,",
            "      durationMs: Date.now() - start,",
            "      transactionId: res.locals.transactionId,",
            "    });",
            "  });",
            "  next();",
            "};",
        ])
        .blank()
        .line(s.export_default("requestLogger"))
        .finish()
}

pub(super) fn error_handler(s: &ModuleSyntax) -> String {
    let mut out = Lines::default();
    out.line(s.import_local("logger", "../utils/logger"))
        .maybe(s.import_types(EXPRESS_HANDLER_TYPES, "express"))
        .blank();
    if s.key().is_typescript() {
        out.lines(&[
            "interface HttpError extends Error {",
            "  status?: number;",
            "}",
        ])
        .blank();
    }
    out.line(format!(
        "const errorHandler = ({}, {}){} => {{",
        s.param("err", "HttpError"),
        handler_params(s, "_req", "_next"),
        s.annotate("void")
    ))
    .lines(&[
        "  const status = err.status || 500;",
        "  logger.error(err.message, {",
        "    status,",
        "    transactionId: res.locals.transactionId,",
        "    stack: err.stack,",
        "  });",
        "  res.status(status).json({",
        "    error: status === 500 ? 'Internal Server Error' : err.message,",
        "    transactionId: res.locals.transactionId,",
        "  });",
        "};",
    ])
    .blank()
    .line(s.export_default("errorHandler"))
    .finish()
}

pub(super) fn health_route(s: &ModuleSyntax) -> String {
    Lines::default()
        .line(s.import_named(&["Router"], "express"))
        .maybe(s.import_types(&["Request", "Response"], "express"))
        .blank()
        .line("const router = Router();")
        .blank()
        .lines(&[
            "/**",
            " * @openapi",
            " * /health:",
            " *   get:",
            " *     summary: Liveness probe",
            " *     responses:",
            " *       200:",
            " *         description: Service is up",
            " */",
        ])
        .line(format!(
            "router.get('/health', ({}, {}) => {{",
            s.param("_req", "Request"),
            s.param("res", "Response")
        ))
        .lines(&[
            "  res.json({",
            "    status: 'ok',",
            "    uptime: process.uptime(),",
            "    timestamp: new Date().toISOString(),",
            "  });",
            "});",
        ])
        .blank()
        .line(s.export_default("router"))
        .finish()
}

pub(super) fn app_entry(s: &ModuleSyntax) -> String {
    Lines::default()
        .line(s.import_default("express", "express"))
        .line(s.import_default("dotenv", "dotenv"))
        .line(s.import_local("transactionId", "./middleware/transactionId"))
        .line(s.import_local("requestLogger", "./middleware/requestLogger"))
        .line(s.import_local("errorHandler", "./middleware/errorHandler"))
        .line(s.import_local("healthRouter", "./routes/health"))
        .line(s.import_local("setupSwagger", "./config/swagger"))
        .blank()
        .line("dotenv.config();")
        .blank()
        .line("const app = express();")
        .line("const apiVersion = process.env.API_VERSION || 'v1';")
        .blank()
        .lines(&[
            "app.use(express.json());",
            "app.use(transactionId);",
            "app.use(requestLogger);",
        ])
        .blank()
        .line("app.use(`/api/${apiVersion}`, healthRouter);")
        .line("setupSwagger(app);")
        .blank()
        .line("app.use(errorHandler);")
        .blank()
        .line(s.export_default("app"))
        .finish()
}

pub(super) fn server_entry(s: &ModuleSyntax, p: &RenderParams) -> String {
    Lines::default()
        .line(s.import_local("app", "./app"))
        .line(s.import_local("connectDB", "./config/database"))
        .line(s.import_local("logger", "./utils/logger"))
        .blank()
        .line(format!(
            "const PORT = Number(process.env.PORT) || {};",
            p.port
        ))
        .blank()
        .line(format!(
            "const start = async (){} => {{",
            s.annotate("Promise<void>")
        ))
        .lines(&["  await connectDB();", "  app.listen(PORT, () => {"])
        .line(format!(
            "    logger.info(`{} listening on port ${{PORT}}`);",
            p.project_name
        ))
        .lines(&["  });", "};"])
        .blank()
        .line(format!("start().catch(({}) => {{", s.param("error", "unknown")))
        .lines(&[
            "  logger.error('failed to start server', { error });",
            "  process.exit(1);",
            "});",
        ])
        .finish()
}
